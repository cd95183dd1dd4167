use crate::{Error, Result};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

/// Spawns and tracks the Chrome process the workflow drives
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    profile_path: PathBuf,
    headless: bool,
    debugging_port: u16,
}

impl ChromeLauncher {
    pub fn new(chrome_path: PathBuf, profile_path: PathBuf, headless: bool) -> Self {
        Self {
            chrome_path,
            profile_path,
            headless,
            debugging_port: 9222,
        }
    }

    /// Launch Chrome with remote debugging enabled
    pub fn launch(&self) -> Result<Child> {
        Command::new(&self.chrome_path)
            .args(self.build_args())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {e}")))
    }

    fn build_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.debugging_port),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            format!("--user-data-dir={}", self.profile_path.display()),
        ];

        if self.headless {
            // headless means nobody can answer a CAPTCHA challenge; callers
            // opt in knowingly
            args.push("--headless=new".to_string());
        }

        // navigation happens through the driver session
        args.push("about:blank".to_string());

        args
    }

    pub fn debugging_port(&self) -> u16 {
        self.debugging_port
    }
}
