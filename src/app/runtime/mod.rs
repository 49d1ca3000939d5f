//! Runtime assembly: configuration, channels, workers, and the event loop.

pub mod channels;
pub mod event_loop;
pub mod handlers;
pub mod workers;

use std::sync::atomic::Ordering;

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::terminal::{restore_terminal, setup_terminal};
use crate::config::Config;
use crate::logic;
use crate::state::{AppState, SERVICE_TYPES};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Command-line overrides passed through from `main`.
#[derive(Debug, Default)]
pub struct LaunchOptions {
    /// Override for the backend base URL.
    pub backend_url: Option<String>,
    /// Postal code to prefill and search for on startup.
    pub zip: Option<String>,
    /// Service category label to preselect (matched case-insensitively).
    pub service: Option<String>,
}

/// What: Run the application to completion.
///
/// Inputs:
/// - `options`: Command-line overrides on top of file and environment
///   configuration.
///
/// Details:
/// - Spawns the terminal reader thread and the background workers, enters
///   the alternate screen, runs the select loop, and restores the terminal
///   on the way out even when the loop errors.
pub async fn run(options: LaunchOptions) -> Result<()> {
    let mut config = Config::load();
    if let Some(url) = options.backend_url {
        config.backend_url = url;
    }

    let mut app = AppState::with_config(config.clone());
    if let Some(service) = &options.service
        && let Some(index) = SERVICE_TYPES
            .iter()
            .position(|&(label, _)| label.eq_ignore_ascii_case(service))
    {
        app.service_selected = index;
    }
    if let Some(zip) = options.zip {
        app.zip_caret = zip.chars().count();
        app.zip_input = zip;
    }

    let channels::Channels {
        event_tx,
        event_rx,
        event_thread_cancelled,
        search_req_tx,
        search_req_rx,
        search_res_tx,
        search_res_rx,
        lookup_req_tx,
        lookup_req_rx,
        lookup_res_tx,
        lookup_res_rx,
        tick_tx,
        tick_rx,
    } = channels::create_channels();

    workers::spawn_event_thread(event_tx, event_thread_cancelled.clone());
    workers::spawn_search_worker(config.clone(), search_req_rx, search_res_tx);
    workers::spawn_geocode_worker(config, lookup_req_rx, lookup_res_tx);
    workers::spawn_tick_worker(tick_tx);

    let mut loop_channels = channels::LoopChannels {
        event_rx,
        search_req_tx,
        search_res_rx,
        lookup_req_tx,
        lookup_res_rx,
        tick_rx,
    };

    // A prefilled postal code searches immediately.
    if !app.zip_input.trim().is_empty() {
        logic::submit_search(&mut app, &loop_channels.search_req_tx);
    }

    setup_terminal()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
    let result = event_loop::run_event_loop(&mut terminal, &mut app, &mut loop_channels).await;

    event_thread_cancelled.store(true, Ordering::Relaxed);
    restore_terminal()?;
    result
}
