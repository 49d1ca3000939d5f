//! Core value types used by fixmap state.

use crate::map::Coordinate;

/// A single customer review attached to a vendor.
///
/// The rating is forwarded as reported by the backend; the client does not
/// validate its range.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Review {
    /// Reviewer display name.
    pub author: String,
    /// Integer star rating, nominally 0..=5.
    pub rating: i64,
    /// Free-text review body.
    pub text: String,
    /// Human-readable relative age, e.g. "1 week ago".
    pub relative_time_description: String,
}

/// A repair vendor as returned by the backend search endpoint.
///
/// Reviews arrive in backend relevance order; the first entry is the most
/// prominent one and is always shown on the card.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Vendor {
    /// Identifier, unique within a result set.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Aggregate rating, 0.0..=5.0.
    pub rating: f64,
    /// Total review count reported by the backend.
    pub reviews_count: u64,
    /// Contact phone number, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Website URL, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Reviews in relevance order.
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Latitude; absent when the backend could not geocode the vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude; absent when the backend could not geocode the vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Vendor {
    /// Geocoordinate when both components are present.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate { lat, lng }),
            _ => None,
        }
    }

    /// Whether the card offers a "see more reviews" toggle.
    pub fn has_extra_reviews(&self) -> bool {
        self.reviews.len() > 1
    }
}

/// Search request sent to the background search worker.
#[derive(Clone, Debug)]
pub struct SearchRequest {
    /// Monotonic identifier used to discard stale responses.
    pub id: u64,
    /// Normalized cache key the results will be stored under.
    pub key: String,
    /// Postal code as entered (trimmed); the backend validates the format.
    pub zip_code: String,
    /// Backend service category filter, `None` for "all".
    pub service_type: Option<String>,
}

/// Outcome for a prior [`SearchRequest`].
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Echoed identifier from the originating request.
    pub id: u64,
    /// Echoed cache key.
    pub key: String,
    /// Vendor list in backend rank order, or why the search failed.
    pub result: Result<Vec<Vendor>, SearchError>,
}

/// Why a backend search failed.
///
/// A failed search never touches the cache, the result list, or the markers;
/// it only fills the error slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// Non-2xx HTTP status; carries the status and a truncated body excerpt.
    Server {
        /// HTTP status code.
        status: u16,
        /// At most 100 characters of the response body.
        excerpt: String,
    },
    /// 2xx response whose payload carried a backend-reported error message.
    Backend {
        /// Message supplied by the backend.
        message: String,
    },
    /// Network or transport failure, including undecodable payloads.
    Transport,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Server { status, excerpt } => {
                write!(f, "server error (status {status}): {excerpt}")
            }
            Self::Backend { message } => write!(f, "search failed: {message}"),
            Self::Transport => write!(f, "network error while contacting the search service"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Geocoding request sent to the background lookup worker.
#[derive(Clone, Debug)]
pub struct LookupRequest {
    /// Free-text location input, typically the postal code.
    pub address: String,
}

/// Which UI element currently has keyboard focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    /// Postal-code input field.
    #[default]
    Zip,
    /// Service-category selector.
    Service,
    /// Vendor result list.
    Results,
}
