//! Controllers: pure or effectful transitions on [`AppState`], invoked from
//! the event layer and the runtime handlers.

pub mod cache;
pub mod disclosure;
pub mod lookup;
pub mod query;

pub use disclosure::toggle_reviews;
pub use lookup::{apply_lookup_outcome, submit_lookup};
pub use query::{query_key, submit_search};

use crate::state::{AppState, Vendor};

/// What: Publish a result sequence to the UI and the map.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `vendors`: New result sequence (possibly empty).
///
/// Details:
/// - Resets selection, prunes disclosure entries for vendors that
///   disappeared, and rebuilds the map markers. Both the cache-hit path and
///   the network path publish through here so the map can never drift from
///   the list.
pub fn publish_results(app: &mut AppState, vendors: Vec<Vendor>) {
    app.results = vendors;
    app.reset_selection();
    disclosure::prune_expanded(app);
    if let Some(map) = app.map.as_mut() {
        map.sync_markers(&app.results);
    }
}
