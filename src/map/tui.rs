//! Terminal-rendered map surface.
//!
//! [`CanvasSurface`] implements [`MapSurface`] on top of a plain camera model
//! (center + zoom) and a marker store; `ui::map` paints it with a ratatui
//! `Canvas`. Zoom halves the visible span per level, so zoom 0 shows the
//! whole world.

use std::collections::HashMap;

use super::{Coordinate, LatLngBounds, MapSurface, MarkerHandle};

/// Deepest zoom a bounds fit may select; keeps single-marker result sets
/// from zooming into a featureless canvas.
const FIT_MAX_ZOOM: u8 = 14;

/// Extra margin applied around fitted bounds.
const FIT_PADDING: f64 = 1.2;

/// A marker placed on the canvas.
#[derive(Clone, Debug)]
pub struct PlacedMarker {
    /// Marker position.
    pub position: Coordinate,
    /// Vendor display name, rendered as a label at close zoom.
    pub title: String,
}

/// Camera plus marker store backing the TUI map pane.
#[derive(Clone, Debug)]
pub struct CanvasSurface {
    center: Coordinate,
    zoom: u8,
    next_handle: MarkerHandle,
    markers: HashMap<MarkerHandle, PlacedMarker>,
}

impl CanvasSurface {
    /// Surface with the given initial camera and no markers.
    pub fn new(center: Coordinate, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            next_handle: 0,
            markers: HashMap::new(),
        }
    }

    /// Current camera center.
    pub fn center(&self) -> Coordinate {
        self.center
    }

    /// Current zoom level.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Markers in arbitrary order, for rendering.
    pub fn markers(&self) -> impl Iterator<Item = &PlacedMarker> {
        self.markers.values()
    }

    /// Visible longitude/latitude spans at the current zoom.
    fn spans(&self) -> (f64, f64) {
        let scale = f64::from(1u32 << u32::from(self.zoom.min(30)));
        (360.0 / scale, 180.0 / scale)
    }

    /// What: Visible world rectangle for the canvas.
    ///
    /// Output:
    /// - `(x_bounds, y_bounds)` as `[min, max]` longitude and latitude arrays
    ///   matching ratatui's `Canvas::x_bounds`/`y_bounds`.
    pub fn viewport(&self) -> ([f64; 2], [f64; 2]) {
        let (lng_span, lat_span) = self.spans();
        (
            [
                self.center.lng - lng_span / 2.0,
                self.center.lng + lng_span / 2.0,
            ],
            [
                self.center.lat - lat_span / 2.0,
                self.center.lat + lat_span / 2.0,
            ],
        )
    }

    /// What: Map a terminal cell inside the map pane to a world coordinate.
    ///
    /// Inputs:
    /// - `rect`: Inner content rectangle of the map pane `(x, y, w, h)`.
    /// - `column`, `row`: Clicked cell.
    ///
    /// Output:
    /// - The coordinate under the cell, or `None` when the click is outside
    ///   the rectangle or the rectangle is degenerate.
    pub fn cell_to_coordinate(
        &self,
        rect: (u16, u16, u16, u16),
        column: u16,
        row: u16,
    ) -> Option<Coordinate> {
        let (x, y, w, h) = rect;
        if w == 0 || h == 0 || column < x || row < y || column >= x + w || row >= y + h {
            return None;
        }
        let (x_bounds, y_bounds) = self.viewport();
        // Sample at the cell midpoint; rows grow downwards, latitude upwards.
        let fx = (f64::from(column - x) + 0.5) / f64::from(w);
        let fy = (f64::from(row - y) + 0.5) / f64::from(h);
        Some(Coordinate {
            lng: x_bounds[0] + fx * (x_bounds[1] - x_bounds[0]),
            lat: y_bounds[1] - fy * (y_bounds[1] - y_bounds[0]),
        })
    }

    /// Hit tolerance in degrees for a click, scaled to the visible span.
    pub fn click_tolerance(&self, rect_width: u16) -> f64 {
        let (lng_span, _) = self.spans();
        // Roughly two character cells.
        lng_span / f64::from(rect_width.max(1)) * 2.0
    }
}

impl MapSurface for CanvasSurface {
    fn create_marker(&mut self, position: Coordinate, title: &str) -> MarkerHandle {
        self.next_handle += 1;
        self.markers.insert(
            self.next_handle,
            PlacedMarker {
                position,
                title: title.to_string(),
            },
        );
        self.next_handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.remove(&handle);
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) {
        let Some(center) = bounds.center() else {
            return;
        };
        let (lat_span, lng_span) = bounds.span();
        let mut zoom = 0u8;
        while zoom < FIT_MAX_ZOOM {
            let scale = f64::from(1u32 << u32::from(zoom + 1));
            let next_lng = 360.0 / scale;
            let next_lat = 180.0 / scale;
            if next_lng < lng_span * FIT_PADDING || next_lat < lat_span * FIT_PADDING {
                break;
            }
            zoom += 1;
        }
        self.center = center;
        self.zoom = zoom;
    }

    fn set_center(&mut self, center: Coordinate) {
        self.center = center;
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokyo() -> Coordinate {
        Coordinate {
            lat: 35.6895,
            lng: 139.6917,
        }
    }

    /// What: The viewport halves per zoom level and stays centered.
    #[test]
    fn viewport_narrows_with_zoom() {
        let mut surface = CanvasSurface::new(tokyo(), 0);
        let ([x0, x1], [y0, y1]) = surface.viewport();
        assert!((x1 - x0 - 360.0).abs() < 1e-9);
        assert!((y1 - y0 - 180.0).abs() < 1e-9);

        surface.set_zoom(3);
        let ([x0, x1], [y0, y1]) = surface.viewport();
        assert!((x1 - x0 - 45.0).abs() < 1e-9);
        assert!((y1 - y0 - 22.5).abs() < 1e-9);
        assert!(((x0 + x1) / 2.0 - tokyo().lng).abs() < 1e-9);
        assert!(((y0 + y1) / 2.0 - tokyo().lat).abs() < 1e-9);
    }

    /// What: Fitting a region recenters on its midpoint and picks the deepest
    /// zoom that still covers it with padding.
    #[test]
    fn fit_bounds_centers_and_covers() {
        let mut surface = CanvasSurface::new(tokyo(), 10);
        let mut bounds = LatLngBounds::new();
        bounds.extend(Coordinate {
            lat: 35.0,
            lng: 139.0,
        });
        bounds.extend(Coordinate {
            lat: 36.0,
            lng: 140.0,
        });
        surface.fit_bounds(&bounds);

        let c = surface.center();
        assert!((c.lat - 35.5).abs() < 1e-9);
        assert!((c.lng - 139.5).abs() < 1e-9);
        let ([x0, x1], [y0, y1]) = surface.viewport();
        assert!(x0 <= 139.0 && x1 >= 140.0);
        assert!(y0 <= 35.0 && y1 >= 36.0);
    }

    /// What: A single-point fit clamps to the maximum fit zoom instead of
    /// zooming indefinitely.
    #[test]
    fn fit_bounds_single_point_clamps_zoom() {
        let mut surface = CanvasSurface::new(tokyo(), 2);
        let mut bounds = LatLngBounds::new();
        bounds.extend(tokyo());
        surface.fit_bounds(&bounds);
        assert_eq!(surface.zoom(), FIT_MAX_ZOOM);
    }

    /// What: Cell mapping inverts the viewport; corners and center round-trip.
    #[test]
    fn cell_to_coordinate_maps_center_and_rejects_outside() {
        let surface = CanvasSurface::new(tokyo(), 4);
        let rect = (10, 5, 40, 20);
        let mid = surface
            .cell_to_coordinate(rect, 30, 15)
            .expect("inside pane");
        assert!((mid.lng - tokyo().lng).abs() < 1.0);
        assert!((mid.lat - tokyo().lat).abs() < 1.0);
        // Top edge maps to higher latitude than the bottom edge.
        let top = surface.cell_to_coordinate(rect, 30, 5).expect("top");
        let bottom = surface.cell_to_coordinate(rect, 30, 24).expect("bottom");
        assert!(top.lat > bottom.lat);
        assert!(surface.cell_to_coordinate(rect, 9, 5).is_none());
        assert!(surface.cell_to_coordinate(rect, 50, 5).is_none());
    }
}
