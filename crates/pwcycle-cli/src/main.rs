use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "pwcycle")]
#[command(author, version)]
#[command(
    about = "Flush a Google account's password history by cycling temporary passwords",
    long_about = "Google rejects reuse of an account's last 100 passwords. pwcycle logs in, \
                  changes the password 102 times to derived temporary values, then sets the \
                  password you actually want, pushing every retained entry out of the history.\n\n\
                  Set up account recovery options before running this: an interrupted run \
                  leaves the account on a temporary password."
)]
struct Cli {
    /// Account email address
    #[arg(value_name = "EMAIL")]
    email: String,

    /// Password currently set on the account
    #[arg(value_name = "CURRENT_PASSWORD")]
    current_password: String,

    /// Password to end up with (may be a previously-used one)
    #[arg(value_name = "DESIRED_PASSWORD")]
    desired_password: String,

    /// Path to the Chrome binary
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Named persistent Chrome profile (keeps the Google session between
    /// runs, reducing CAPTCHA challenges)
    #[arg(long, value_name = "NAME")]
    profile: Option<String>,

    /// Run Chrome headless (CAPTCHA challenges cannot be answered manually)
    #[arg(long)]
    headless: bool,

    /// JSON file overriding title markers, timeouts, or the change count
    #[arg(long, value_name = "FILE")]
    markers: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    commands::cycle::execute(
        cli.email,
        cli.current_password,
        cli.desired_password,
        cli.chrome_path,
        cli.profile,
        cli.headless,
        cli.markers,
        cli.yes,
    )
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("pwcycle_cli=debug,pwcycle_core=debug,pwcycle_browser=debug")
    } else {
        EnvFilter::new("pwcycle_cli=info,pwcycle_core=info,pwcycle_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
