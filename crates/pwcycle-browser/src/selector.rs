use std::time::Duration;

/// Element lookup strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Css,
    XPath,
}

/// One element lookup: how to search, what to search for, and how long to
/// keep polling for a match before giving up.
#[derive(Debug, Clone)]
pub struct Selector {
    pub strategy: Strategy,
    pub value: String,
    pub timeout: Duration,
}

impl Selector {
    pub fn css(value: impl Into<String>, timeout: Duration) -> Self {
        Self {
            strategy: Strategy::Css,
            value: value.into(),
            timeout,
        }
    }

    pub fn xpath(value: impl Into<String>, timeout: Duration) -> Self {
        Self {
            strategy: Strategy::XPath,
            value: value.into(),
            timeout,
        }
    }
}
