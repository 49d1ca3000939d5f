//! Binary entry point: CLI parsing, logging setup, and runtime launch.

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use fixmap::app::LaunchOptions;
use fixmap::{config, util};

/// Keeps the non-blocking log writer alive for the process lifetime.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Timestamp formatter producing `YYYY-MM-DD HH:MM:SS` in UTC.
struct FixmapTimer;

impl FormatTime for FixmapTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as i64);
        write!(w, "{}", util::ts_to_date(secs))
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "fixmap",
    version,
    about = "Find air-conditioner repair vendors near a Japanese postal code"
)]
struct Cli {
    /// Base URL of the search backend (overrides config and environment).
    #[arg(long)]
    backend_url: Option<String>,

    /// Postal code to search for immediately on startup.
    #[arg(long)]
    zip: Option<String>,

    /// Service category to preselect: all, cleaning, repair, or installation.
    #[arg(long)]
    service: Option<String>,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Set up file logging under the state directory; the TUI owns the terminal,
/// so nothing is ever logged to stdout.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
    let path = config::logs_dir().join("fixmap.log");
    match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(FixmapTimer)
                .init();
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_timer(FixmapTimer)
                .init();
            tracing::warn!(path = %path.display(), error = %e, "log file unavailable");
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let options = LaunchOptions {
        backend_url: cli.backend_url,
        zip: cli.zip,
        service: cli.service,
    };
    if let Err(e) = fixmap::app::run(options).await {
        // Best effort: the loop restores on clean exits, but a failed setup
        // or draw can leave the terminal in raw mode.
        let _ = fixmap::app::terminal::restore_terminal();
        tracing::error!(error = %e, "fatal error");
        eprintln!("fixmap: {e}");
        std::process::exit(1);
    }
}
