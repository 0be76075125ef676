//! PixelBox terminal client entry point

use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use pixelbox_client::ClientConfig;
use pixelbox_tui::core::AppContext;
use pixelbox_tui::ui::App;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "pixelbox", about = "Terminal client for the PixelBox blind box store")]
struct Args {
    /// API server base URL
    #[arg(long, env = "PIXELBOX_SERVER_URL", default_value = "http://localhost:7001")]
    server_url: String,

    /// Directory for the session cache and logs
    #[arg(long, env = "PIXELBOX_DATA_DIR", default_value = ".pixelbox")]
    data_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, env = "PIXELBOX_TIMEOUT", default_value_t = 10)]
    timeout: u64,
}

fn init_logging(data_dir: &std::path::Path) -> anyhow::Result<WorkerGuard> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).context("failed to create logs directory")?;

    let file_appender = rolling::daily(&log_dir, "pixelbox.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            EnvFilter::new("info,pixelbox_tui=debug,pixelbox_client=debug")
        } else {
            EnvFilter::new("warn,pixelbox_tui=info")
        }
    });

    // stdout belongs to the TUI; logs go to the rolling file and the in-app pane
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(non_blocking_file);

    tui_logger::init_logger(log::LevelFilter::Debug).ok();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(tui_logger::tracing_subscriber_layer())
        .init();

    Ok(guard)
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = std::io::stdout().execute(LeaveAlternateScreen);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let _log_guard = init_logging(&args.data_dir)?;
    tracing::info!(server = %args.server_url, "starting pixelbox client");

    let client = ClientConfig::new(&args.server_url)
        .with_timeout(args.timeout)
        .build()
        .context("failed to build HTTP client")?;
    let ctx = AppContext::new(Arc::new(client), &args.data_dir)
        .context("failed to initialize application state")?;

    let mut terminal = setup_terminal()?;
    let result = App::new(ctx).run(&mut terminal).await;
    restore_terminal();

    result
}
