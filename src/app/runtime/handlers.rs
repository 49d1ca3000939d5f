//! Handlers applied on the event loop for worker outcomes, marker clicks,
//! and ticks.

use std::time::{Duration, Instant};

use crate::logic;
use crate::state::{AppState, HIGHLIGHT_DURATION_MS, SearchOutcome};

/// What: Apply a finished search to the application state.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `outcome`: Result of a background fetch, tagged with its request id.
///
/// Details:
/// - Outcomes whose id is not the latest dispatched search are discarded
///   before touching any state, so a slow older response can never overwrite
///   a newer one.
/// - Success stores the sequence in the cache under its key and publishes it.
/// - Failure surfaces the message and leaves the prior results, markers, and
///   cache untouched. Loading clears on every accepted outcome.
pub fn handle_search_outcome(app: &mut AppState, outcome: SearchOutcome) {
    if outcome.id != app.latest_search_id {
        tracing::debug!(
            id = outcome.id,
            latest = app.latest_search_id,
            "stale search outcome discarded"
        );
        return;
    }
    app.loading = false;
    match outcome.result {
        Ok(vendors) => {
            app.search_cache.put(outcome.key, vendors.clone());
            logic::publish_results(app, vendors);
        }
        Err(err) => {
            tracing::warn!(key = outcome.key, error = %err, "search failed");
            app.error = Some(err.to_string());
        }
    }
}

/// What: React to a click on a map marker.
///
/// Details:
/// - Selects the vendor so the results list scrolls it into view, and starts
///   a timed highlight on its card which [`handle_tick`] reverts.
pub fn handle_marker_click(app: &mut AppState, vendor_id: &str) {
    if !app.select_vendor(vendor_id) {
        return;
    }
    let deadline = Instant::now() + Duration::from_millis(HIGHLIGHT_DURATION_MS);
    app.highlight = Some((vendor_id.to_string(), deadline));
}

/// What: Advance time-driven state on each tick.
///
/// Details:
/// - Spins the loading indicator while a search is in flight and reverts an
///   expired card highlight.
pub fn handle_tick(app: &mut AppState) {
    if app.loading {
        app.spinner_frame = app.spinner_frame.wrapping_add(1);
    }
    if let Some((_, deadline)) = &app.highlight
        && Instant::now() >= *deadline
    {
        app.highlight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::state::{SearchError, Vendor};

    fn vendor(id: &str, lat: f64, lng: f64) -> Vendor {
        Vendor {
            id: id.into(),
            name: format!("Vendor {id}"),
            address: "Shibuya 1-2-3".into(),
            rating: 4.5,
            reviews_count: 12,
            phone: None,
            website: None,
            reviews: Vec::new(),
            latitude: Some(lat),
            longitude: Some(lng),
        }
    }

    /// What: A successful latest outcome clears loading, caches the vendors,
    /// publishes them, and rebuilds the markers.
    #[test]
    fn latest_success_publishes_and_caches() {
        let mut app = AppState::with_config(Config::default());
        app.latest_search_id = 3;
        app.loading = true;

        handle_search_outcome(
            &mut app,
            SearchOutcome {
                id: 3,
                key: "150-0001-all".into(),
                result: Ok(vec![vendor("v1", 35.66, 139.70)]),
            },
        );

        assert!(!app.loading);
        assert_eq!(app.results.len(), 1);
        assert!(app.search_cache.get("150-0001-all").is_some());
        assert_eq!(app.map.as_ref().expect("map").marker_count(), 1);
    }

    /// What: An outcome whose id is not the latest is discarded entirely,
    /// even the loading flag stays as it was.
    #[test]
    fn stale_outcome_is_discarded() {
        let mut app = AppState::with_config(Config::default());
        app.latest_search_id = 5;
        app.loading = true;

        handle_search_outcome(
            &mut app,
            SearchOutcome {
                id: 4,
                key: "150-0001-all".into(),
                result: Ok(vec![vendor("v1", 35.66, 139.70)]),
            },
        );

        assert!(app.loading);
        assert!(app.results.is_empty());
        assert!(app.search_cache.get("150-0001-all").is_none());
        assert_eq!(app.map.as_ref().expect("map").marker_count(), 0);
    }

    /// What: A failed latest outcome surfaces the message and retains the
    /// previously published results and markers.
    #[test]
    fn failure_retains_previous_results() {
        let mut app = AppState::with_config(Config::default());
        app.latest_search_id = 1;
        handle_search_outcome(
            &mut app,
            SearchOutcome {
                id: 1,
                key: "150-0001-all".into(),
                result: Ok(vec![vendor("v1", 35.66, 139.70)]),
            },
        );

        app.latest_search_id = 2;
        app.loading = true;
        handle_search_outcome(
            &mut app,
            SearchOutcome {
                id: 2,
                key: "160-0001-all".into(),
                result: Err(SearchError::Transport),
            },
        );

        assert!(!app.loading);
        assert!(app.error.is_some());
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.map.as_ref().expect("map").marker_count(), 1);
        assert!(app.search_cache.get("160-0001-all").is_none());
    }

    /// What: A marker click selects the vendor and arms a highlight that a
    /// later tick reverts once the deadline passes.
    #[test]
    fn marker_click_highlights_then_tick_reverts() {
        let mut app = AppState::with_config(Config::default());
        app.results = vec![vendor("v1", 35.66, 139.70), vendor("v2", 35.68, 139.73)];

        handle_marker_click(&mut app, "v2");
        assert_eq!(app.selected, 1);
        assert_eq!(app.list_state.selected(), Some(1));
        assert!(app.highlight.is_some());

        // Force the deadline into the past; the next tick reverts it.
        app.highlight = Some(("v2".into(), Instant::now() - Duration::from_millis(1)));
        handle_tick(&mut app);
        assert!(app.highlight.is_none());
    }

    /// What: A click naming an unknown vendor changes nothing.
    #[test]
    fn unknown_marker_click_is_ignored() {
        let mut app = AppState::with_config(Config::default());
        app.results = vec![vendor("v1", 35.66, 139.70)];
        handle_marker_click(&mut app, "nope");
        assert_eq!(app.selected, 0);
        assert!(app.highlight.is_none());
    }
}
