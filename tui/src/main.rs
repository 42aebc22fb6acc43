//! GraceWise TUI Entry Point
//!
//! Launches the terminal chat surface.
//!
//! # Usage
//!
//! ```bash
//! # Use ~/.config/gracewise/chat.toml and the environment
//! gracewise-tui
//!
//! # Talk to a specific endpoint
//! gracewise-tui --endpoint http://localhost:8000/api/ask
//!
//! # Canned replies, no server needed
//! gracewise-tui --mock --mock-latency-ms 200
//!
//! # Verbose logging (written to the log file, not the screen)
//! RUST_LOG=debug gracewise-tui --log-file /tmp/gracewise.log
//! ```

use std::fs::File;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use gracewise_conductor::{load_config_from_path, ChatConfig, ConfigOverrides};
use gracewise_tui::{App, SessionClient};

/// GraceWise - terminal chat client
#[derive(Parser, Debug)]
#[command(name = "gracewise-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Question endpoint URL
    #[arg(short = 'e', long, value_name = "URL")]
    endpoint: Option<String>,

    /// Use canned replies instead of the endpoint
    #[arg(short = 'm', long)]
    mock: bool,

    /// Simulated latency for canned replies
    #[arg(long, value_name = "MS")]
    mock_latency_ms: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "GRACEWISE_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file (the terminal is in use by the UI)
    #[arg(long, env = "GRACEWISE_LOG_FILE", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(ref url) = self.endpoint {
            overrides = overrides.with_endpoint_url(url.clone());
        }
        if self.mock {
            overrides = overrides.with_mock_mode(true);
        }
        if let Some(ms) = self.mock_latency_ms {
            overrides = overrides.with_mock_latency_ms(ms);
        }
        overrides
    }
}

/// Default log file location
///
/// `$XDG_STATE_HOME/gracewise/gracewise-tui.log`, falling back to the temp dir.
fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .map_or_else(std::env::temp_dir, |dir| dir.join("gracewise"))
        .join("gracewise-tui.log")
}

/// Initialize logging to a file
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {parent:?}"))?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create log file: {path:?}"))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("gracewise_conductor=info,gracewise_tui=info")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(())
}

/// Resolve configuration: CLI flags over environment over file over defaults
fn resolve_config(args: &Args) -> Result<ChatConfig> {
    let mut config = load_config_from_path(args.config.clone())?;
    args.overrides().apply(&mut config);
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(&log_path)?;

    let config = resolve_config(&args)?;
    let client = SessionClient::from_config(&config)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        source = %config.source(),
        backend = client.backend_name(),
        "GraceWise TUI starting"
    );

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: gracewise-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin/stdout are piped or the session");
        eprintln!("has no controlling terminal (for SSH, pass -t).");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, client, config.sidebar_capacity).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("GraceWise TUI exited");
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: SessionClient,
    sidebar_capacity: usize,
) -> Result<()> {
    let mut app = App::new(client, sidebar_capacity)?;
    app.run(terminal).await
}
