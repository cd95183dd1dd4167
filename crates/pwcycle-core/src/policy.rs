use crate::config::Timeouts;
use std::time::Duration;

/// How a form step should be submitted and how long to wait for its
/// confirmation marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPolicy {
    pub deadline: Duration,
    pub auto_submit: bool,
}

impl ConfirmPolicy {
    /// A visible CAPTCHA means a human has to type the challenge and press
    /// submit themselves: no auto-submit, extended deadline. Otherwise the
    /// form is submitted programmatically with the normal deadline.
    pub fn for_captcha(captcha_present: bool, timeouts: &Timeouts) -> Self {
        if captcha_present {
            Self {
                deadline: timeouts.confirm_with_captcha(),
                auto_submit: false,
            }
        } else {
            Self {
                deadline: timeouts.confirm(),
                auto_submit: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_captcha_auto_submits_with_short_deadline() {
        let policy = ConfirmPolicy::for_captcha(false, &Timeouts::default());

        assert!(policy.auto_submit);
        assert_eq!(policy.deadline, Duration::from_secs(10));
    }

    #[test]
    fn test_captcha_disables_auto_submit_and_extends_deadline() {
        let policy = ConfirmPolicy::for_captcha(true, &Timeouts::default());

        assert!(!policy.auto_submit);
        assert_eq!(policy.deadline, Duration::from_secs(40));
    }
}
