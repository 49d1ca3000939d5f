//! Channel definitions for runtime communication.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::sources::geocode::GeocodeOutcome;
use crate::state::{LookupRequest, SearchOutcome, SearchRequest};

/// All channel ends used between the main event loop and the background
/// workers. Receivers are moved into their consumers at spawn time.
pub struct Channels {
    /// Terminal events forwarded from the blocking reader thread.
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Set on shutdown so the reader thread stops polling.
    pub event_thread_cancelled: Arc<AtomicBool>,

    /// Search requests into the search worker.
    pub search_req_tx: mpsc::UnboundedSender<SearchRequest>,
    pub search_req_rx: mpsc::UnboundedReceiver<SearchRequest>,
    /// Search outcomes back to the event loop.
    pub search_res_tx: mpsc::UnboundedSender<SearchOutcome>,
    pub search_res_rx: mpsc::UnboundedReceiver<SearchOutcome>,

    /// Geocode requests into the lookup worker.
    pub lookup_req_tx: mpsc::UnboundedSender<LookupRequest>,
    pub lookup_req_rx: mpsc::UnboundedReceiver<LookupRequest>,
    /// Geocode outcomes back to the event loop.
    pub lookup_res_tx: mpsc::UnboundedSender<GeocodeOutcome>,
    pub lookup_res_rx: mpsc::UnboundedReceiver<GeocodeOutcome>,

    /// Periodic ticks driving the spinner and timed highlight reverts.
    pub tick_tx: mpsc::UnboundedSender<()>,
    pub tick_rx: mpsc::UnboundedReceiver<()>,
}

/// The channel ends the event loop itself polls and dispatches on; the
/// remaining ends from [`Channels`] move into the workers.
pub struct LoopChannels {
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    pub search_req_tx: mpsc::UnboundedSender<SearchRequest>,
    pub search_res_rx: mpsc::UnboundedReceiver<SearchOutcome>,
    pub lookup_req_tx: mpsc::UnboundedSender<LookupRequest>,
    pub lookup_res_rx: mpsc::UnboundedReceiver<GeocodeOutcome>,
    pub tick_rx: mpsc::UnboundedReceiver<()>,
}

/// Create every channel pair with the cancellation flag cleared.
pub fn create_channels() -> Channels {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<CEvent>();
    let (search_req_tx, search_req_rx) = mpsc::unbounded_channel::<SearchRequest>();
    let (search_res_tx, search_res_rx) = mpsc::unbounded_channel::<SearchOutcome>();
    let (lookup_req_tx, lookup_req_rx) = mpsc::unbounded_channel::<LookupRequest>();
    let (lookup_res_tx, lookup_res_rx) = mpsc::unbounded_channel::<GeocodeOutcome>();
    let (tick_tx, tick_rx) = mpsc::unbounded_channel::<()>();
    Channels {
        event_tx,
        event_rx,
        event_thread_cancelled: Arc::new(AtomicBool::new(false)),
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
    }
}
