//! docchat Entry Point
//!
//! Launches the terminal chat panel.
//!
//! Usage:
//!   docchat [OPTIONS]
//!
//! Options:
//!   --endpoint <URL>       Chat endpoint (default: http://localhost:5000/chat)
//!   --document <TARGET>    Document shown in the viewer pane
//!   --instant              Show replies at once instead of revealing them
//!   --speed-ms <MS>        Delay between reveal steps
//!   --batch-size <N>       Characters added per reveal step
//!   --config <FILE>        Configuration file path
//!   --log-file <FILE>      Write logs to a file instead of stderr

use std::fs::File;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docchat_tui::App;
use panel_core::{default_config_path, load_config_from_path, ConfigOverrides, PanelConfig};

/// Terminal chat panel for asking questions about a document
#[derive(Parser, Debug)]
#[command(name = "docchat")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chat endpoint URL
    #[arg(short = 'e', long, value_name = "URL")]
    endpoint: Option<String>,

    /// Document shown in the viewer pane
    #[arg(short = 'd', long, value_name = "TARGET")]
    document: Option<String>,

    /// Show replies at once
    #[arg(long)]
    instant: bool,

    /// Delay between reveal steps in milliseconds
    #[arg(long, value_name = "MS")]
    speed_ms: Option<u64>,

    /// Characters added per reveal step
    #[arg(long, value_name = "N")]
    batch_size: Option<usize>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "DOCCHAT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, env = "DOCCHAT_LOG_FILE", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            viewer_target: self.document.clone(),
            speed_ms: self.speed_ms,
            batch_size: self.batch_size,
            instant: self.instant.then_some(true),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Set up logging
    init_logging(args.log_file.as_ref())?;

    let config_path = args.config.clone().or_else(default_config_path);
    let config = load_config_from_path(config_path, &args.overrides())?;
    tracing::info!(
        endpoint = %config.endpoint,
        source = %config.source(),
        "Configuration loaded"
    );

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: docchat requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or SSH ran without -t.");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

/// Log to a file when given one, otherwise to stderr
fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::from_default_env());

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .init();
        }
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &PanelConfig,
) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    app.run(terminal).await
}
