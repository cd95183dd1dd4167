use crate::Result;
use std::path::{Path, PathBuf};

/// Manages the Chrome user-data directory for a run.
///
/// A persistent profile keeps the Google session (cookies, device trust)
/// between runs, which noticeably reduces CAPTCHA challenges. The default is
/// a throwaway directory removed when the run ends.
pub struct ProfileManager {
    path: PathBuf,
    is_temporary: bool,
}

impl ProfileManager {
    /// Throwaway profile, deleted on drop
    pub fn temporary() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;

        Ok(Self {
            path: temp_dir.keep(),
            is_temporary: true,
        })
    }

    /// Create or reuse a persistent profile directory
    pub fn persistent(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path)?;
        }

        Ok(Self {
            path,
            is_temporary: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }
}

impl Drop for ProfileManager {
    fn drop(&mut self) {
        if self.is_temporary && self.path.exists() {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}
