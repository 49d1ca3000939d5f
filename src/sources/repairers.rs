//! Client for the repairer search backend.
//!
//! `GET {base}/api/repairers?zip_code=..&service_type=..` returns either
//! `{ "repairers": [...] }` or `{ "error": "..." }`; non-2xx responses carry
//! an arbitrary text body. The backend is the validation authority for the
//! postal-code format; the client forwards whatever was typed.

use crate::state::{SearchError, Vendor};
use crate::util::{excerpt, percent_encode};

/// Maximum characters of a non-2xx body surfaced to the user.
const EXCERPT_MAX: usize = 100;

#[derive(Debug, serde::Deserialize)]
struct SearchResponse {
    #[serde(default)]
    repairers: Option<Vec<Vendor>>,
    #[serde(default)]
    error: Option<String>,
}

/// What: Query the backend for vendors near a postal code.
///
/// Inputs:
/// - `base_url`: Backend base URL without trailing slash.
/// - `zip_code`: Trimmed, non-empty postal code.
/// - `service_type`: Optional category filter; omitted when empty.
///
/// Output:
/// - `Ok(vendors)` in backend rank order (empty when the field is absent);
///   `Err` classified per the error taxonomy.
///
/// # Errors
/// - [`SearchError::Server`] for non-2xx statuses, with a truncated excerpt
///   of the body.
/// - [`SearchError::Backend`] when a 2xx payload carries an `error` field.
/// - [`SearchError::Transport`] for network failures or undecodable bodies.
pub async fn fetch_repairers(
    base_url: &str,
    zip_code: &str,
    service_type: Option<&str>,
) -> Result<Vec<Vendor>, SearchError> {
    let mut url = format!(
        "{}/api/repairers?zip_code={}",
        base_url.trim_end_matches('/'),
        percent_encode(zip_code)
    );
    if let Some(service) = service_type.map(str::trim).filter(|s| !s.is_empty()) {
        url.push_str("&service_type=");
        url.push_str(&percent_encode(service));
    }

    let response = super::client().get(&url).send().await.map_err(|e| {
        tracing::warn!(error = %e, "search request failed");
        SearchError::Transport
    })?;
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        tracing::warn!(error = %e, "search response body unreadable");
        SearchError::Transport
    })?;

    if !status.is_success() {
        tracing::warn!(
            status = status.as_u16(),
            preview = %excerpt(&body, EXCERPT_MAX),
            "search backend returned non-success status"
        );
        return Err(SearchError::Server {
            status: status.as_u16(),
            excerpt: excerpt(&body, EXCERPT_MAX),
        });
    }

    let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
        tracing::warn!(error = %e, "search response not valid JSON");
        SearchError::Transport
    })?;
    if let Some(message) = parsed.error {
        return Err(SearchError::Backend { message });
    }
    Ok(parsed.repairers.unwrap_or_default())
}
