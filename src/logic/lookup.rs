//! Location lookup: geocode the postal code and recenter the map.
//!
//! This controller only ever touches the map camera and the error slot; it
//! never reads or writes the result list or the search cache.

use tokio::sync::mpsc;

use crate::map::RECENTER_ZOOM;
use crate::sources::geocode::{GeocodeOutcome, GeocodeStatus};
use crate::state::{AppState, LookupRequest};

/// What: Validate the input and dispatch a geocoding request.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `lookup_req_tx`: Channel to the background geocode worker.
///
/// Details:
/// - Empty postal code and an uninitialized map surface fail fast into the
///   error slot without dispatching anything.
pub fn submit_lookup(app: &mut AppState, lookup_req_tx: &mpsc::UnboundedSender<LookupRequest>) {
    let zip = app.zip_input.trim();
    if zip.is_empty() {
        app.error = Some("enter a postal code".to_string());
        return;
    }
    if app.map.is_none() {
        app.error = Some("map not ready yet".to_string());
        return;
    }
    tracing::info!(address = zip, "geocode lookup dispatched");
    let _ = lookup_req_tx.send(LookupRequest {
        address: zip.to_string(),
    });
}

/// What: Apply a geocode outcome to the map camera and error slot.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `outcome`: Classified provider status plus geocoded coordinates.
///
/// Details:
/// - `OK` with at least one result recenters on the first coordinate at the
///   fixed recenter zoom and clears the error slot.
/// - Everything else surfaces the status's message; the camera and markers
///   are untouched. `OK` with an empty result list falls into the generic
///   message.
pub fn apply_lookup_outcome(app: &mut AppState, outcome: &GeocodeOutcome) {
    match (outcome.status, outcome.locations.first()) {
        (GeocodeStatus::Ok, Some(&location)) => {
            if let Some(map) = app.map.as_mut() {
                map.recenter(location, RECENTER_ZOOM);
            }
            app.error = None;
        }
        (status, _) => {
            app.error = Some(status.message().to_string());
        }
    }
}
