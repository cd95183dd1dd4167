use crate::Result;
use async_trait::async_trait;

/// One live, exclusively-owned browser session against the account provider.
///
/// This is the seam between the cycling workflow and the browser: the real
/// implementation drives Chrome, tests implement it with an in-memory
/// account.
#[async_trait]
pub trait AccountSession: Send {
    /// Authenticate the session. Must complete before any password change.
    async fn login(&mut self, email: &str, password: &str) -> Result<()>;

    /// Change the account password from `current` to `new_password`.
    ///
    /// The provider re-authenticates with `current` first, so the caller
    /// must pass the password that is actually set server-side.
    async fn change_password(&mut self, current: &str, new_password: &str) -> Result<()>;
}
