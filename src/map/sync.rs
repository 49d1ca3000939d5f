//! Marker reconciliation between the result list and the map surface.

use std::collections::HashMap;

use super::{Coordinate, LatLngBounds, MapSurface, MarkerHandle};
use crate::state::Vendor;

/// Zoom level applied after a successful postal-code recenter.
pub const RECENTER_ZOOM: u8 = 12;

/// Owner of the map surface and its marker set.
///
/// Markers are rebuilt wholesale on every publish rather than diffed; result
/// sets are small and replaced as a unit per search.
#[derive(Debug)]
pub struct MapSyncEngine<S> {
    surface: S,
    /// Vendor id -> (surface handle, placed position).
    markers: HashMap<String, (MarkerHandle, Coordinate)>,
}

impl<S: MapSurface> MapSyncEngine<S> {
    /// Wrap an initialized surface with an empty marker table.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            markers: HashMap::new(),
        }
    }

    /// Read access to the underlying surface (rendering, camera queries).
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of markers currently placed.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Position of the marker for `vendor_id`, if one is placed.
    pub fn marker_position(&self, vendor_id: &str) -> Option<Coordinate> {
        self.markers.get(vendor_id).map(|&(_, pos)| pos)
    }

    /// What: Rebuild the marker set to mirror `vendors` and frame the camera.
    ///
    /// Inputs:
    /// - `vendors`: The published result sequence (possibly empty).
    ///
    /// Details:
    /// - Destroys every existing marker, then places one marker per vendor
    ///   with a geocoordinate; vendors without coordinates get no marker.
    /// - Fits the viewport to the accumulated bounds. When no vendor is
    ///   geocoded the camera is left untouched.
    pub fn sync_markers(&mut self, vendors: &[Vendor]) {
        for (_, (handle, _)) in self.markers.drain() {
            self.surface.remove_marker(handle);
        }
        let mut bounds = LatLngBounds::new();
        for vendor in vendors {
            let Some(position) = vendor.coordinate() else {
                continue;
            };
            let handle = self.surface.create_marker(position, &vendor.name);
            self.markers.insert(vendor.id.clone(), (handle, position));
            bounds.extend(position);
        }
        if !bounds.is_empty() {
            self.surface.fit_bounds(&bounds);
        }
        tracing::debug!(markers = self.markers.len(), "map markers rebuilt");
    }

    /// Recenter the camera on `center` at `zoom`. Markers are untouched.
    pub fn recenter(&mut self, center: Coordinate, zoom: u8) {
        self.surface.set_center(center);
        self.surface.set_zoom(zoom);
    }

    /// What: Find the vendor whose marker is closest to `target`.
    ///
    /// Inputs:
    /// - `target`: A coordinate derived from a click on the map pane.
    /// - `max_distance_deg`: Hit tolerance in degrees.
    ///
    /// Output:
    /// - The vendor id of the nearest marker within tolerance, or `None`.
    pub fn nearest_vendor(&self, target: Coordinate, max_distance_deg: f64) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (id, &(_, pos)) in &self.markers {
            let d_lat = pos.lat - target.lat;
            let d_lng = pos.lng - target.lng;
            let dist = (d_lat * d_lat + d_lng * d_lng).sqrt();
            if dist <= max_distance_deg && best.is_none_or(|(_, b)| dist < b) {
                best = Some((id.as_str(), dist));
            }
        }
        best.map(|(id, _)| id)
    }
}
