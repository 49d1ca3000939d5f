//! Expanded-review disclosure state.

use crate::state::AppState;

/// What: Toggle visibility of a vendor's non-primary reviews.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `vendor_id`: Vendor whose card is being toggled.
///
/// Details:
/// - Pure set toggle, independent of searches and the map. Toggling twice
///   restores the prior state. The event layer only offers the toggle for
///   vendors with more than one review.
pub fn toggle_reviews(app: &mut AppState, vendor_id: &str) {
    if !app.expanded_reviews.remove(vendor_id) {
        app.expanded_reviews.insert(vendor_id.to_string());
    }
}

/// Drop disclosure entries for vendors absent from the current results, so a
/// new search cannot leave expansion state pointing at ids that no longer
/// render.
pub fn prune_expanded(app: &mut AppState) {
    let ids: std::collections::HashSet<&str> =
        app.results.iter().map(|v| v.id.as_str()).collect();
    app.expanded_reviews.retain(|id| ids.contains(id.as_str()));
}
