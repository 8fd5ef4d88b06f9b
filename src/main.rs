//! Orchard - terminal dashboard for live classification monitoring.
//!
//! Connects to a classification server's push channel, seeds itself from
//! the snapshot API, and renders live distribution, totals, activity, and
//! recent-event views in the terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Start the dashboard against the default local server
//! orchard
//!
//! # Point at another server
//! orchard --channel-url ws://host:5000/ --api-url http://host:5000/api
//!
//! # No server handy: generate a synthetic feed
//! orchard --demo
//!
//! # With verbose logging
//! orchard -v
//! ```

use std::io::Write;
use std::panic;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use orchard_client::api::{SnapshotClient, spawn_snapshot_service};
use orchard_client::feed::{FeedConfig, spawn_feed};
use orchard_client::synthetic::{SyntheticConfig, spawn_synthetic};
use orchard_core::config::DashboardConfig;
use orchard_core::logging::{LogGuard, init_logging};
use orchard_tui::app::{App, AppChannels};
use orchard_tui::palette::CategoryPalette;

/// Orchard classification dashboard
///
/// A terminal-based dashboard showing live classification events,
/// per-category totals, and recent activity.
#[derive(Parser, Debug)]
#[command(name = "orchard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Push channel endpoint (overrides the config file)
    #[arg(long)]
    channel_url: Option<String>,

    /// Query service base URL (overrides the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Path to the configuration file (defaults to ~/.orchard/config.yaml)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Directory for log files (defaults to ~/.orchard/logs/)
    #[arg(long)]
    log_dir: Option<std::path::PathBuf>,

    /// Enable verbose logging (increases log level)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run against a synthetic feed instead of a real server
    #[arg(long)]
    demo: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::from(1);
        }
    };

    // Install panic hook to ensure terminal cleanup
    install_panic_hook();

    info!("Starting Orchard dashboard");

    match run_app(&cli) {
        Ok(()) => {
            info!("Orchard dashboard exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Orchard dashboard error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Install a panic hook that restores the terminal before printing the panic message.
///
/// This ensures that even if the application panics while in raw mode with the
/// alternate screen enabled, the terminal will be properly restored so the user
/// can see the panic message and continue using their terminal.
fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore terminal state
        let _ = restore_terminal();

        // Call the original panic hook to print the panic message
        original_hook(panic_info);
    }));
}

/// Restore terminal to its normal state.
fn restore_terminal() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();

    let _ = crossterm::terminal::disable_raw_mode();
    crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen)?;
    crossterm::execute!(stdout, crossterm::cursor::Show)?;
    stdout.flush()?;

    Ok(())
}

/// Set up logging based on CLI arguments.
fn setup_logging(cli: &Cli) -> orchard_core::Result<LogGuard> {
    let debug = cli.verbose > 0;
    init_logging(cli.log_dir.clone(), debug)
}

/// Load the configuration file and apply CLI overrides.
fn load_config(cli: &Cli) -> orchard_core::Result<DashboardConfig> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(DashboardConfig::default_config_path);
    let mut config = DashboardConfig::load(&path)?;

    if let Some(ref url) = cli.channel_url {
        config = config.with_channel_url(url.clone());
    }
    if let Some(ref url) = cli.api_url {
        config = config.with_api_base_url(url.clone());
    }
    config.validate()?;

    Ok(config)
}

/// Wire the data sources and run the TUI application.
fn run_app(cli: &Cli) -> orchard_tui::AppResult<()> {
    let config = load_config(cli)?;

    // The feed and snapshot tasks live on the runtime; the TUI loop stays
    // on this thread and drains their channels each tick.
    let runtime = tokio::runtime::Runtime::new()?;
    let _enter = runtime.enter();

    let (feed, feed_rx) = if cli.demo {
        info!("demo mode: synthetic feed");
        spawn_synthetic(SyntheticConfig::default())
    } else {
        info!(url = %config.channel_url, "connecting to live feed");
        spawn_feed(FeedConfig::new(config.channel_url.clone()))
    };

    let client = SnapshotClient::new(config.api_base_url.clone())?;
    let (refresh_tx, snapshot_rx) = spawn_snapshot_service(client);

    let palette = CategoryPalette::from_overrides(&config.palette);
    let mut app = App::new(
        AppChannels {
            feed: Some(feed),
            feed_rx,
            snapshot_rx,
            refresh_tx,
        },
        palette,
    );
    app.run()
}
