//! Mouse handling: marker clicks on the map pane and list interaction.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::runtime::handlers;
use crate::state::{AppState, Focus};

/// Whether a cell falls inside an `(x, y, w, h)` rectangle.
fn contains(rect: Option<(u16, u16, u16, u16)>, column: u16, row: u16) -> bool {
    rect.is_some_and(|(x, y, w, h)| column >= x && column < x + w && row >= y && row < y + h)
}

/// What: Apply a mouse event to the application state.
///
/// Details:
/// - A left click on the map pane resolves the nearest marker within the
///   click tolerance and selects and highlights that vendor's card.
/// - A left click on the results list focuses it; scrolling over it moves the
///   selection.
pub fn handle_mouse(app: &mut AppState, event: MouseEvent) {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if contains(app.map_rect, event.column, event.row) {
                if let Some(id) = clicked_vendor(app, event.column, event.row) {
                    handlers::handle_marker_click(app, &id);
                }
            } else if contains(app.results_rect, event.column, event.row) {
                app.focus = Focus::Results;
            }
        }
        MouseEventKind::ScrollUp if contains(app.results_rect, event.column, event.row) => {
            if app.selected > 0 {
                app.selected -= 1;
                app.list_state.select(Some(app.selected));
            }
        }
        MouseEventKind::ScrollDown if contains(app.results_rect, event.column, event.row) => {
            if !app.results.is_empty() && app.selected + 1 < app.results.len() {
                app.selected += 1;
                app.list_state.select(Some(app.selected));
            }
        }
        _ => {}
    }
}

/// Resolve a click inside the map pane to a marker's vendor id.
fn clicked_vendor(app: &AppState, column: u16, row: u16) -> Option<String> {
    let rect = app.map_rect?;
    let map = app.map.as_ref()?;
    let target = map.surface().cell_to_coordinate(rect, column, row)?;
    let tolerance = map.surface().click_tolerance(rect.2);
    map.nearest_vendor(target, tolerance).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::state::Vendor;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn vendor(id: &str, lat: f64, lng: f64) -> Vendor {
        Vendor {
            id: id.into(),
            name: format!("Vendor {id}"),
            address: String::new(),
            rating: 4.0,
            reviews_count: 1,
            phone: None,
            website: None,
            reviews: Vec::new(),
            latitude: Some(lat),
            longitude: Some(lng),
        }
    }

    /// What: A left click near a marker selects and highlights that vendor.
    #[test]
    fn map_click_selects_nearest_marker() {
        let mut app = AppState::with_config(Config::default());
        app.results = vec![vendor("v1", 35.66, 139.70), vendor("v2", 35.80, 139.90)];
        app.reset_selection();
        if let Some(map) = app.map.as_mut() {
            map.sync_markers(&[vendor("v1", 35.66, 139.70), vendor("v2", 35.80, 139.90)]);
        }
        app.map_rect = Some((0, 0, 40, 20));

        // The fit centers the camera between the markers; v2 sits in the
        // upper right quadrant of the pane.
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 31, 2));
        assert_eq!(app.selected, 1);
        assert!(matches!(&app.highlight, Some((id, _)) if id == "v2"));
    }

    /// What: A click on an empty map region changes nothing.
    #[test]
    fn map_click_off_markers_is_ignored() {
        let mut app = AppState::with_config(Config::default());
        app.results = vec![vendor("v1", 35.66, 139.70)];
        app.reset_selection();
        app.map_rect = Some((0, 0, 40, 20));

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        assert_eq!(app.selected, 0);
        assert!(app.highlight.is_none());
    }

    /// What: Scrolling over the results list moves the selection and clamps
    /// at both ends.
    #[test]
    fn scroll_moves_selection_within_bounds() {
        let mut app = AppState::default();
        app.results = vec![vendor("v1", 35.0, 139.0), vendor("v2", 35.1, 139.1)];
        app.reset_selection();
        app.results_rect = Some((0, 0, 30, 10));

        handle_mouse(&mut app, mouse(MouseEventKind::ScrollDown, 5, 5));
        assert_eq!(app.selected, 1);
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollDown, 5, 5));
        assert_eq!(app.selected, 1);
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollUp, 5, 5));
        assert_eq!(app.selected, 0);
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollUp, 5, 5));
        assert_eq!(app.selected, 0);
    }

    /// What: Clicking the results list pane moves focus to it.
    #[test]
    fn results_click_focuses_list() {
        let mut app = AppState::default();
        app.results_rect = Some((0, 0, 30, 10));
        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 5, 5));
        assert_eq!(app.focus, Focus::Results);
    }
}
