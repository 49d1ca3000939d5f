//! Background workers: terminal event reader, search fetcher, geocoder, and
//! the tick source.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::sources;
use crate::sources::geocode::GeocodeOutcome;
use crate::state::{LookupRequest, SearchOutcome, SearchRequest};

/// Interval between ticks; drives the spinner and highlight expiry.
pub const TICK_INTERVAL_MS: u64 = 200;

/// What: Read terminal events on a dedicated blocking thread.
///
/// Inputs:
/// - `event_tx`: Destination for every crossterm event.
/// - `cancelled`: Checked between polls so shutdown does not hang on `read`.
///
/// Details:
/// - `poll` with a short timeout keeps the thread responsive to the flag.
///   The thread also exits once the receiving side is gone.
pub fn spawn_event_thread(event_tx: mpsc::UnboundedSender<CEvent>, cancelled: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        loop {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            match crossterm::event::poll(Duration::from_millis(50)) {
                Ok(true) => match crossterm::event::read() {
                    Ok(ev) => {
                        if event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "terminal event read failed");
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "terminal event poll failed");
                    break;
                }
            }
        }
    });
}

/// What: Serve search requests against the backend.
///
/// Details:
/// - Each request is fetched on its own task so overlapping searches run
///   concurrently; the outcome carries the request id and the event loop
///   decides whether it is still the latest.
pub fn spawn_search_worker(
    config: Config,
    mut search_req_rx: mpsc::UnboundedReceiver<SearchRequest>,
    search_res_tx: mpsc::UnboundedSender<SearchOutcome>,
) {
    tokio::spawn(async move {
        while let Some(req) = search_req_rx.recv().await {
            let base_url = config.backend_url.clone();
            let res_tx = search_res_tx.clone();
            tokio::spawn(async move {
                let result =
                    sources::repairers::fetch_repairers(&base_url, &req.zip_code, req.service_type.as_deref())
                        .await;
                let _ = res_tx.send(SearchOutcome {
                    id: req.id,
                    key: req.key,
                    result,
                });
            });
        }
    });
}

/// What: Serve geocode lookups against the configured provider.
pub fn spawn_geocode_worker(
    config: Config,
    mut lookup_req_rx: mpsc::UnboundedReceiver<LookupRequest>,
    lookup_res_tx: mpsc::UnboundedSender<GeocodeOutcome>,
) {
    tokio::spawn(async move {
        while let Some(req) = lookup_req_rx.recv().await {
            let outcome = sources::geocode::geocode(
                &config.geocode_endpoint,
                &config.maps_api_key,
                &req.address,
                &config.country,
            )
            .await;
            if lookup_res_tx.send(outcome).is_err() {
                break;
            }
        }
    });
}

/// What: Emit a tick roughly five times a second.
pub fn spawn_tick_worker(tick_tx: mpsc::UnboundedSender<()>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
        loop {
            interval.tick().await;
            if tick_tx.send(()).is_err() {
                break;
            }
        }
    });
}
