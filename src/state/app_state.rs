//! Central application state shared by the event, networking, and UI layers.

use std::collections::HashSet;
use std::time::Instant;

use ratatui::widgets::ListState;

use crate::config::Config;
use crate::logic::cache::QueryCache;
use crate::map::{CanvasSurface, MapSyncEngine};
use crate::state::types::{Focus, Vendor};

/// Service categories offered by the selector.
///
/// The label is shown in the UI; the value is the backend filter string
/// (`None` means no filter). The backend vocabulary is Japanese.
pub const SERVICE_TYPES: &[(&str, Option<&str>)] = &[
    ("All", None),
    ("Cleaning", Some("クリーニング")),
    ("Repair", Some("修理")),
    ("Installation", Some("設置")),
];

/// How long a marker-click highlight stays on a vendor card.
pub const HIGHLIGHT_DURATION_MS: u64 = 1500;

/// Global application state.
///
/// Mutated only on the event loop; background workers communicate through
/// channels and never touch this directly. Nothing here is persisted.
#[derive(Debug)]
pub struct AppState {
    /// Current postal-code input text.
    pub zip_input: String,
    /// Caret position (in characters) within the postal-code input.
    pub zip_caret: usize,
    /// Index into [`SERVICE_TYPES`] for the selected category.
    pub service_selected: usize,
    /// Published result sequence, in backend rank order.
    pub results: Vec<Vendor>,
    /// Index into `results` that is currently highlighted.
    pub selected: usize,
    /// List selection state for the results list.
    pub list_state: ListState,
    /// Whether a backend search is in flight.
    pub loading: bool,
    /// Single user-facing error slot.
    pub error: Option<String>,
    /// Vendor ids whose non-primary reviews are currently shown.
    pub expanded_reviews: HashSet<String>,
    /// Session cache of results keyed by normalized query.
    pub search_cache: QueryCache,
    /// Identifier of the most recently issued search; outcomes for any other
    /// id are stale and discarded.
    pub latest_search_id: u64,
    /// Next search identifier to allocate.
    pub next_search_id: u64,
    /// Map engine; `None` until the surface is initialized.
    pub map: Option<MapSyncEngine<CanvasSurface>>,
    /// Vendor id flashed after a marker click, with its revert deadline.
    pub highlight: Option<(String, Instant)>,
    /// Which UI element has keyboard focus.
    pub focus: Focus,
    /// Spinner animation frame for the loading indicator.
    pub spinner_frame: usize,
    /// Runtime configuration.
    pub config: Config,
    /// Inner content rectangle of the results list (x, y, w, h).
    pub results_rect: Option<(u16, u16, u16, u16)>,
    /// Inner content rectangle of the map pane (x, y, w, h).
    pub map_rect: Option<(u16, u16, u16, u16)>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            zip_input: String::new(),
            zip_caret: 0,
            service_selected: 0,
            results: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
            loading: false,
            error: None,
            expanded_reviews: HashSet::new(),
            search_cache: QueryCache::new(),
            latest_search_id: 0,
            next_search_id: 1,
            map: None,
            highlight: None,
            focus: Focus::Zip,
            spinner_frame: 0,
            config: Config::default(),
            results_rect: None,
            map_rect: None,
        }
    }
}

impl AppState {
    /// State with the map surface initialized from `config`.
    pub fn with_config(config: Config) -> Self {
        let surface = CanvasSurface::new(config.default_center, config.default_zoom);
        Self {
            map: Some(MapSyncEngine::new(surface)),
            config,
            ..Self::default()
        }
    }

    /// Label of the selected service category.
    pub fn service_label(&self) -> &'static str {
        SERVICE_TYPES
            .get(self.service_selected)
            .map_or("All", |&(label, _)| label)
    }

    /// Backend filter value of the selected category, `None` for "all".
    pub fn service_value(&self) -> Option<&'static str> {
        SERVICE_TYPES
            .get(self.service_selected)
            .and_then(|&(_, value)| value)
    }

    /// Cycle the service selector by `delta` positions, wrapping around.
    pub fn cycle_service(&mut self, delta: isize) {
        let len = SERVICE_TYPES.len() as isize;
        let current = self.service_selected as isize;
        self.service_selected = ((current + delta).rem_euclid(len)) as usize;
    }

    /// Currently highlighted vendor, if any results are shown.
    pub fn selected_vendor(&self) -> Option<&Vendor> {
        self.results.get(self.selected)
    }

    /// What: Move selection to the vendor with `vendor_id`.
    ///
    /// Output:
    /// - `true` when the vendor is present in the current results; selection
    ///   and list state are updated so the card scrolls into view.
    pub fn select_vendor(&mut self, vendor_id: &str) -> bool {
        if let Some(index) = self.results.iter().position(|v| v.id == vendor_id) {
            self.selected = index;
            self.list_state.select(Some(index));
            true
        } else {
            false
        }
    }

    /// Clamp selection after the results changed and mirror it into the list
    /// state.
    pub fn reset_selection(&mut self) {
        self.selected = 0;
        self.list_state.select(if self.results.is_empty() {
            None
        } else {
            Some(0)
        });
    }

    /// Whether the vendor's extra reviews are currently disclosed.
    pub fn is_expanded(&self, vendor_id: &str) -> bool {
        self.expanded_reviews.contains(vendor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// What: Service selector cycles forward and backward with wrap-around
    /// and exposes the backend filter value.
    #[test]
    fn service_selector_cycles_and_maps_values() {
        let mut app = AppState::default();
        assert_eq!(app.service_label(), "All");
        assert_eq!(app.service_value(), None);

        app.cycle_service(1);
        assert_eq!(app.service_label(), "Cleaning");
        assert_eq!(app.service_value(), Some("クリーニング"));

        app.cycle_service(-2);
        assert_eq!(app.service_label(), "Installation");
        assert_eq!(app.service_value(), Some("設置"));

        app.cycle_service(1);
        assert_eq!(app.service_label(), "All");
    }

    /// What: Selecting by vendor id updates both the index and the list
    /// state; unknown ids leave selection alone.
    #[test]
    fn select_vendor_by_id() {
        let mut app = AppState::default();
        app.results = vec![
            Vendor {
                id: "v1".into(),
                name: "A".into(),
                address: String::new(),
                rating: 4.0,
                reviews_count: 0,
                phone: None,
                website: None,
                reviews: Vec::new(),
                latitude: None,
                longitude: None,
            },
            Vendor {
                id: "v2".into(),
                name: "B".into(),
                address: String::new(),
                rating: 4.0,
                reviews_count: 0,
                phone: None,
                website: None,
                reviews: Vec::new(),
                latitude: None,
                longitude: None,
            },
        ];
        app.reset_selection();

        assert!(app.select_vendor("v2"));
        assert_eq!(app.selected, 1);
        assert_eq!(app.list_state.selected(), Some(1));

        assert!(!app.select_vendor("missing"));
        assert_eq!(app.selected, 1);
    }

    /// What: With-config construction initializes the map engine at the
    /// configured camera.
    #[test]
    fn with_config_initializes_map() {
        let app = AppState::with_config(Config::default());
        let map = app.map.expect("map initialized");
        let center = map.surface().center();
        assert!((center.lat - 35.6895).abs() < 1e-9);
        assert_eq!(map.surface().zoom(), 10);
    }
}
