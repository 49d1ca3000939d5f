//! Client for the geocoding provider.
//!
//! Speaks the Google Geocoding API wire shape: a `status` string plus a list
//! of results, each exposing a `geometry.location` coordinate. Requests are
//! restricted to a single country.

use crate::map::Coordinate;
use crate::util::percent_encode;

/// Default provider endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Provider status for a geocoding call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeocodeStatus {
    /// At least one result is expected.
    Ok,
    /// The address resolved to nothing.
    ZeroResults,
    /// Provider rate limit reached.
    OverQueryLimit,
    /// Access denied, usually an API key configuration issue.
    RequestDenied,
    /// The request itself was malformed.
    InvalidRequest,
    /// Any status string not recognized above, and transport failures.
    Unknown,
}

impl GeocodeStatus {
    /// Classify a provider status string.
    pub fn from_provider(status: &str) -> Self {
        match status {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "INVALID_REQUEST" => Self::InvalidRequest,
            _ => Self::Unknown,
        }
    }

    /// User-facing message for a lookup that did not recenter the map.
    pub fn message(self) -> &'static str {
        match self {
            Self::ZeroResults => {
                "no location found for that postal code; check that it is correct"
            }
            Self::OverQueryLimit => "map lookups are rate limited; try again in a moment",
            Self::RequestDenied => "map service access denied; check the API key configuration",
            Self::InvalidRequest => "invalid lookup request; check the postal code format",
            Self::Ok | Self::Unknown => "could not determine a location for that postal code",
        }
    }
}

/// Outcome of a geocoding call.
#[derive(Clone, Debug)]
pub struct GeocodeOutcome {
    /// Classified provider status.
    pub status: GeocodeStatus,
    /// Geocoded coordinates in provider order; the first one wins.
    pub locations: Vec<Coordinate>,
}

impl GeocodeOutcome {
    fn unknown() -> Self {
        Self {
            status: GeocodeStatus::Unknown,
            locations: Vec::new(),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, serde::Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, serde::Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, serde::Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// What: Geocode a free-text address within a country restriction.
///
/// Inputs:
/// - `endpoint`: Provider URL (overridable for tests).
/// - `api_key`: Provider API key; sent as-is.
/// - `address`: Free-text input, typically a postal code.
/// - `country`: ISO country code for the `components` restriction.
///
/// Output:
/// - A [`GeocodeOutcome`]; transport and decode failures classify as
///   [`GeocodeStatus::Unknown`] rather than erroring, so callers always get
///   a status to surface.
pub async fn geocode(endpoint: &str, api_key: &str, address: &str, country: &str) -> GeocodeOutcome {
    let url = format!(
        "{endpoint}?address={}&components=country:{}&key={}",
        percent_encode(address),
        percent_encode(country),
        percent_encode(api_key)
    );
    let response = match super::client().get(&url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "geocode request failed");
            return GeocodeOutcome::unknown();
        }
    };
    let body = match response.text().await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "geocode response body unreadable");
            return GeocodeOutcome::unknown();
        }
    };
    let parsed: GeocodeResponse = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "geocode response not valid JSON");
            return GeocodeOutcome::unknown();
        }
    };
    let status = GeocodeStatus::from_provider(&parsed.status);
    if status != GeocodeStatus::Ok {
        tracing::info!(status = parsed.status, "geocode returned non-OK status");
    }
    GeocodeOutcome {
        status,
        locations: parsed
            .results
            .into_iter()
            .map(|r| Coordinate {
                lat: r.geometry.location.lat,
                lng: r.geometry.location.lng,
            })
            .collect(),
    }
}
