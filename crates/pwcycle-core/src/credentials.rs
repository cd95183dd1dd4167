/// Account credentials for one cycling run
///
/// `current_password` must match the account's actual server-side password
/// when the run starts; the workflow rebinds its working copy after every
/// successful change.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub current_password: String,
    pub desired_password: String,
}

impl Credentials {
    pub fn new(email: String, current_password: String, desired_password: String) -> Self {
        Self {
            email,
            current_password,
            desired_password,
        }
    }
}

/// Temporary password used at cycling iteration `index`
pub fn temp_password(original: &str, index: usize) -> String {
    format!("{original}-{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_password_format() {
        assert_eq!(temp_password("hunter2", 0), "hunter2-0");
        assert_eq!(temp_password("hunter2", 41), "hunter2-41");
        assert_eq!(temp_password("hunter2", 101), "hunter2-101");
    }

    #[test]
    fn test_temp_passwords_are_distinct() {
        let all: Vec<String> = (0..102).map(|i| temp_password("p@ss word", i)).collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
