use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Element never appeared: {selector} (waited {waited:?})")]
    ElementNotFound { selector: String, waited: Duration },

    #[error("Could not confirm page state: no title containing {expected:?} within {waited:?}")]
    ConfirmationTimeout { expected: String, waited: Duration },

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
