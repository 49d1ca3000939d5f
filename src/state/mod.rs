//! Application state: the central [`AppState`] container and the value types
//! shared across the event, networking, and UI layers.

pub mod app_state;
pub mod types;

pub use app_state::{AppState, HIGHLIGHT_DURATION_MS, SERVICE_TYPES};
pub use types::{Focus, LookupRequest, Review, SearchError, SearchOutcome, SearchRequest, Vendor};
