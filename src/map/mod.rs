//! Map surface abstraction and marker synchronization.
//!
//! The mapping widget is an external collaborator: fixmap only talks to it
//! through the [`MapSurface`] trait. [`MapSyncEngine`] is the sole owner of
//! the marker set; no other component creates or destroys markers.

mod sync;
pub mod tui;

pub use sync::{MapSyncEngine, RECENTER_ZOOM};
pub use tui::CanvasSurface;

/// A WGS84 latitude/longitude pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lng: f64,
}

/// Axis-aligned bounding region accumulated from marker coordinates.
///
/// Starts empty; [`extend`](Self::extend) grows it to cover each coordinate.
/// An empty region must never be used for a camera fit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LatLngBounds {
    extent: Option<(Coordinate, Coordinate)>, // (south-west, north-east)
}

impl LatLngBounds {
    /// A new, empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no coordinate has been added yet.
    pub fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    /// Grow the region to cover `coord`.
    pub fn extend(&mut self, coord: Coordinate) {
        match &mut self.extent {
            None => self.extent = Some((coord, coord)),
            Some((sw, ne)) => {
                sw.lat = sw.lat.min(coord.lat);
                sw.lng = sw.lng.min(coord.lng);
                ne.lat = ne.lat.max(coord.lat);
                ne.lng = ne.lng.max(coord.lng);
            }
        }
    }

    /// South-west corner, if the region is non-empty.
    pub fn south_west(&self) -> Option<Coordinate> {
        self.extent.map(|(sw, _)| sw)
    }

    /// North-east corner, if the region is non-empty.
    pub fn north_east(&self) -> Option<Coordinate> {
        self.extent.map(|(_, ne)| ne)
    }

    /// Midpoint of the region, if non-empty.
    pub fn center(&self) -> Option<Coordinate> {
        self.extent.map(|(sw, ne)| Coordinate {
            lat: (sw.lat + ne.lat) / 2.0,
            lng: (sw.lng + ne.lng) / 2.0,
        })
    }

    /// Latitude and longitude spans in degrees; `(0.0, 0.0)` when empty.
    pub fn span(&self) -> (f64, f64) {
        self.extent
            .map_or((0.0, 0.0), |(sw, ne)| (ne.lat - sw.lat, ne.lng - sw.lng))
    }
}

/// Opaque handle to a marker owned by a [`MapSurface`].
pub type MarkerHandle = u64;

/// External mapping-widget seam.
///
/// Implementations own the rendering of markers and the camera; the engine
/// owns which markers exist.
pub trait MapSurface {
    /// Place a marker at `position` and return a handle for later removal.
    fn create_marker(&mut self, position: Coordinate, title: &str) -> MarkerHandle;

    /// Remove a marker previously returned by
    /// [`create_marker`](Self::create_marker).
    fn remove_marker(&mut self, handle: MarkerHandle);

    /// Fit the viewport to a non-empty bounding region.
    fn fit_bounds(&mut self, bounds: &LatLngBounds);

    /// Recenter the camera without changing the zoom level.
    fn set_center(&mut self, center: Coordinate);

    /// Set the zoom level (0 = whole world, higher = closer).
    fn set_zoom(&mut self, zoom: u8);
}
