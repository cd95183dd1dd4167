use crate::Result;
use crate::config::CycleConfig;
use crate::credentials::{Credentials, temp_password};
use crate::session::AccountSession;

/// Drives the full workflow: login, the history-flushing change loop, and
/// the final change to the desired password.
///
/// A successful run performs exactly `change_count + 1` password changes.
/// Any error aborts immediately; there is no retry and no rollback, so an
/// interrupted run leaves the account on whichever temporary password was
/// set last.
pub struct CycleRunner {
    config: CycleConfig,
}

impl CycleRunner {
    pub fn new(config: CycleConfig) -> Self {
        Self { config }
    }

    pub async fn run<S>(&self, session: &mut S, credentials: &Credentials) -> Result<()>
    where
        S: AccountSession + ?Sized,
    {
        session
            .login(&credentials.email, &credentials.current_password)
            .await?;
        tracing::info!("logged in as {}", credentials.email);

        // Temporary passwords derive from the original so an interrupted run
        // can be diagnosed by trying "<original>-<i>" values.
        let original = credentials.current_password.clone();
        let mut current = original.clone();

        for i in 0..self.config.change_count {
            tracing::info!("password change {} of {}", i + 1, self.config.change_count);
            let temp = temp_password(&original, i);
            session.change_password(&current, &temp).await?;
            current = temp;
        }

        tracing::info!("history flushed, setting desired password");
        session
            .change_password(&current, &credentials.desired_password)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use async_trait::async_trait;
    use std::collections::VecDeque;

    /// In-memory account with a bounded password history, mimicking the
    /// server-side reuse check.
    struct StubAccount {
        password: String,
        history: VecDeque<String>,
        history_depth: usize,
        changes: Vec<(String, String)>,
        fail_after: Option<usize>,
    }

    impl StubAccount {
        fn new(password: &str, history_depth: usize) -> Self {
            let mut history = VecDeque::new();
            history.push_back(password.to_string());
            Self {
                password: password.to_string(),
                history,
                history_depth,
                changes: Vec::new(),
                fail_after: None,
            }
        }

        fn history_contains(&self, password: &str) -> bool {
            self.history.iter().any(|p| p == password)
        }
    }

    #[async_trait]
    impl AccountSession for StubAccount {
        async fn login(&mut self, _email: &str, password: &str) -> Result<()> {
            if password != self.password {
                return Err(Error::Browser("login rejected".to_string()));
            }
            Ok(())
        }

        async fn change_password(&mut self, current: &str, new_password: &str) -> Result<()> {
            if let Some(limit) = self.fail_after {
                if self.changes.len() >= limit {
                    return Err(Error::ConfirmationTimeout {
                        expected: "Sign-in & security".to_string(),
                        waited: std::time::Duration::from_secs(10),
                    });
                }
            }
            self.changes
                .push((current.to_string(), new_password.to_string()));

            if current != self.password {
                return Err(Error::Browser("re-authentication failed".to_string()));
            }
            if self.history_contains(new_password) {
                return Err(Error::Browser("password reuse rejected".to_string()));
            }

            self.password = new_password.to_string();
            self.history.push_back(new_password.to_string());
            while self.history.len() > self.history_depth {
                self.history.pop_front();
            }
            Ok(())
        }
    }

    fn config_with_count(change_count: usize) -> CycleConfig {
        CycleConfig {
            change_count,
            ..CycleConfig::default()
        }
    }

    fn credentials(current: &str, desired: &str) -> Credentials {
        Credentials::new("user@gmail.com".to_string(), current.to_string(), desired.to_string())
    }

    #[tokio::test]
    async fn test_run_performs_exactly_change_count_plus_one_changes() {
        let mut account = StubAccount::new("hunter2", 100);
        let runner = CycleRunner::new(CycleConfig::default());

        runner
            .run(&mut account, &credentials("hunter2", "n3w-pass"))
            .await
            .unwrap();

        assert_eq!(account.changes.len(), 103);
        assert_eq!(account.password, "n3w-pass");
    }

    #[tokio::test]
    async fn test_temporary_passwords_follow_derivation() {
        let mut account = StubAccount::new("hunter2", 100);
        let runner = CycleRunner::new(CycleConfig::default());

        runner
            .run(&mut account, &credentials("hunter2", "n3w-pass"))
            .await
            .unwrap();

        for (i, (from, to)) in account.changes.iter().take(102).enumerate() {
            assert_eq!(*to, format!("hunter2-{i}"));
            if i == 0 {
                assert_eq!(from, "hunter2");
            } else {
                assert_eq!(*from, format!("hunter2-{}", i - 1));
            }
        }
        // final change sets the desired password from the last temporary
        assert_eq!(account.changes[102], ("hunter2-101".to_string(), "n3w-pass".to_string()));
    }

    #[tokio::test]
    async fn test_original_password_evicted_and_reusable() {
        // Depth-H history: H+1 distinct changes evict the original, so
        // cycling H+2 times then reusing the original must succeed.
        let depth = 5;
        let mut account = StubAccount::new("hunter2", depth);
        let runner = CycleRunner::new(config_with_count(depth + 2));

        runner
            .run(&mut account, &credentials("hunter2", "hunter2"))
            .await
            .unwrap();

        assert_eq!(account.password, "hunter2");
    }

    #[tokio::test]
    async fn test_too_few_changes_hit_the_reuse_check() {
        // Only 2 throwaway changes against a depth-5 history: the original
        // is still retained when the final change tries to set it back.
        let mut account = StubAccount::new("hunter2", 5);
        let runner = CycleRunner::new(config_with_count(2));

        let result = runner
            .run(&mut account, &credentials("hunter2", "hunter2"))
            .await;

        assert!(matches!(result, Err(Error::Browser(msg)) if msg.contains("reuse")));
    }

    #[tokio::test]
    async fn test_failed_change_stops_the_run() {
        let mut account = StubAccount::new("hunter2", 100);
        account.fail_after = Some(40);
        let runner = CycleRunner::new(CycleConfig::default());

        let result = runner
            .run(&mut account, &credentials("hunter2", "n3w-pass"))
            .await;

        assert!(matches!(result, Err(Error::ConfirmationTimeout { .. })));
        // the failing call recorded nothing, and no further calls were made
        assert_eq!(account.changes.len(), 40);
        // the account is stranded on a temporary password
        assert_eq!(account.password, "hunter2-39");
    }

    #[tokio::test]
    async fn test_failed_login_makes_no_changes() {
        let mut account = StubAccount::new("hunter2", 100);
        let runner = CycleRunner::new(CycleConfig::default());

        let result = runner
            .run(&mut account, &credentials("wrong-password", "n3w-pass"))
            .await;

        assert!(result.is_err());
        assert!(account.changes.is_empty());
        assert_eq!(account.password, "hunter2");
    }
}
