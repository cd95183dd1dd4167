use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Page-title substrings that mark each step as complete.
///
/// Google's UI text changes between locales and redesigns, so these are
/// configuration data rather than constants. Override them with a JSON file
/// when the defaults stop matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Title substring after a successful login
    pub login_confirmed: String,
    /// Title substring once the re-authentication page has loaded
    pub reauth_page: String,
    /// Title substring after the password change went through
    pub change_confirmed: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            login_confirmed: "My Account".to_string(),
            reauth_page: "Password".to_string(),
            change_confirmed: "Sign-in & security".to_string(),
        }
    }
}

/// Wait budgets for element lookup and page-state confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Seconds to wait for a form element to appear
    pub element_secs: u64,
    /// Seconds to wait for a confirmation marker
    pub confirm_secs: u64,
    /// Confirmation wait when a CAPTCHA is on the page and a human has to
    /// type the challenge
    pub confirm_captcha_secs: u64,
    /// Milliseconds between re-checks while waiting
    pub poll_interval_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            element_secs: 10,
            confirm_secs: 10,
            confirm_captcha_secs: 40,
            poll_interval_ms: 1000,
        }
    }
}

impl Timeouts {
    pub fn element(&self) -> Duration {
        Duration::from_secs(self.element_secs)
    }

    pub fn confirm(&self) -> Duration {
        Duration::from_secs(self.confirm_secs)
    }

    pub fn confirm_with_captcha(&self) -> Duration {
        Duration::from_secs(self.confirm_captcha_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Everything the cycling workflow needs to know about the target site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    pub login_url: String,
    pub change_password_url: String,
    pub markers: Markers,
    pub timeouts: Timeouts,
    /// Number of throwaway password changes before the final one. Google
    /// retains the last 100 passwords; 102 leaves margin so the original
    /// is guaranteed to fall out of the history.
    pub change_count: usize,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            login_url: "https://accounts.google.com/Login".to_string(),
            change_password_url: "https://myaccount.google.com/security/signinoptions/password"
                .to_string(),
            markers: Markers::default(),
            timeouts: Timeouts::default(),
            change_count: 102,
        }
    }
}

impl CycleConfig {
    /// Load overrides from a JSON file; absent fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CycleConfig::default();

        assert_eq!(config.change_count, 102);
        assert_eq!(config.markers.login_confirmed, "My Account");
        assert_eq!(config.markers.reauth_page, "Password");
        assert_eq!(config.markers.change_confirmed, "Sign-in & security");
        assert_eq!(config.timeouts.confirm(), Duration::from_secs(10));
        assert_eq!(config.timeouts.confirm_with_captcha(), Duration::from_secs(40));
        assert_eq!(config.timeouts.poll_interval(), Duration::from_secs(1));
        assert!(config.login_url.starts_with("https://accounts.google.com"));
    }

    #[test]
    fn test_from_file_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"markers": {{"login_confirmed": "Mon compte"}}, "change_count": 50}}"#
        )
        .unwrap();

        let config = CycleConfig::from_file(file.path()).unwrap();

        assert_eq!(config.markers.login_confirmed, "Mon compte");
        assert_eq!(config.change_count, 50);
        // untouched fields keep defaults
        assert_eq!(config.markers.reauth_page, "Password");
        assert_eq!(config.timeouts.confirm_secs, 10);
    }

    #[test]
    fn test_from_file_missing() {
        let result = CycleConfig::from_file(Path::new("/nonexistent/markers.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = CycleConfig::from_file(file.path());
        assert!(matches!(result, Err(crate::Error::Parse(_))));
    }
}
