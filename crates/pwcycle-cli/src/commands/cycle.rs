use anyhow::Result;
use pwcycle_browser::{ChromeFinder, ChromeLauncher, DriverSession, GoogleSession, ProfileManager};
use pwcycle_core::config::CycleConfig;
use pwcycle_core::credentials::Credentials;
use pwcycle_core::cycler::CycleRunner;
use std::path::PathBuf;

/// Kill a process by PID (cross-platform)
fn kill_process_by_pid(pid: u32) {
    #[cfg(unix)]
    {
        use std::process::Command;
        // SIGTERM so Chrome flushes the profile
        let _ = Command::new("kill").arg(pid.to_string()).output();
    }

    #[cfg(windows)]
    {
        use std::process::Command;
        let _ = Command::new("taskkill")
            .args(["/PID", &pid.to_string(), "/F"])
            .output();
    }
}

#[allow(clippy::too_many_arguments)]
pub fn execute(
    email: String,
    current_password: String,
    desired_password: String,
    chrome_path: Option<PathBuf>,
    profile: Option<String>,
    headless: bool,
    markers: Option<PathBuf>,
    yes: bool,
) -> Result<()> {
    let config = match markers {
        Some(path) => {
            tracing::debug!("loading marker overrides from {}", path.display());
            CycleConfig::from_file(&path)?
        }
        None => CycleConfig::default(),
    };

    if desired_password == current_password {
        return Err(anyhow::anyhow!(
            "desired password is already the current password - nothing to do"
        ));
    }

    if !yes && !confirm_run(&email, &config)? {
        println!("❌ Aborted - no changes made");
        return Ok(());
    }

    // Create tokio runtime for async operations
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async {
        // Step 1: Find Chrome binary
        println!("🔍 Locating Chrome...");
        let finder = ChromeFinder::new(chrome_path);
        let chrome_binary = finder.find()?;
        println!("✅ Found Chrome at: {}", chrome_binary.display());

        // Step 2: Setup profile
        let profile_manager = if let Some(profile_name) = profile {
            let profile_path = dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
                .join(".pwcycle")
                .join("profiles")
                .join(profile_name);

            println!("📁 Using profile: {}", profile_path.display());
            ProfileManager::persistent(profile_path)?
        } else {
            println!("📁 Using temporary profile");
            ProfileManager::temporary()?
        };

        // Step 3: Launch Chrome
        let launcher = ChromeLauncher::new(
            chrome_binary,
            profile_manager.path().to_path_buf(),
            headless,
        );
        let debugging_port = launcher.debugging_port();

        println!("🚀 Launching Chrome...");
        let mut chrome_process = launcher.launch()?;
        let chrome_pid = chrome_process.id();
        println!("✅ Chrome started successfully");

        // Step 4: Connect and run the workflow
        let total = config.change_count + 1;
        println!("🔑 Cycling password ({total} changes)...");

        let outcome = async {
            let driver =
                DriverSession::connect(debugging_port, config.timeouts.poll_interval()).await?;
            let mut session = GoogleSession::new(driver, config.clone());

            let credentials = Credentials::new(email, current_password, desired_password);
            CycleRunner::new(config).run(&mut session, &credentials).await
        }
        .await;

        // Step 5: Chrome was ours either way; stop it before reporting.
        // The session stays logged in after 103 password changes, so leaving
        // the window open would be worse than closing it.
        kill_process_by_pid(chrome_pid);
        let _ = tokio::task::spawn_blocking(move || chrome_process.wait()).await;

        outcome?;
        println!("✅ Password history flushed - the desired password is now set");
        Ok(())
    });

    // Explicitly shutdown runtime with timeout to prevent hanging on blocking tasks
    runtime.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}

/// The run mutates a live account 103 times with no rollback; make the
/// operator acknowledge that before touching anything.
fn confirm_run(email: &str, config: &CycleConfig) -> Result<bool> {
    use console::Term;

    println!(
        "⚠️  This will change the password of {} {} times, then set the desired one.",
        email,
        config.change_count
    );
    println!("   Interrupting the run leaves the account on a temporary password.");
    println!("   Make sure account recovery options are set up first.");
    println!();
    println!("Continue? (y/n)");

    let term = Term::stdout();
    let key = term.read_char()?;
    Ok(key.eq_ignore_ascii_case(&'y'))
}
