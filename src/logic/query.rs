//! Search submission: key normalization, cache consultation, and dispatch.

use tokio::sync::mpsc;

use crate::state::{AppState, SearchRequest};

/// What: Derive the cache key for a search.
///
/// Inputs:
/// - `zip_code`: Raw postal-code input.
/// - `service_type`: Backend filter value, `None` or empty for "all".
///
/// Output:
/// - `"{zip}-{service}"` with both parts trimmed; the category falls back to
///   the literal `all`. Two searches with the same normalized inputs always
///   map to the same key.
pub fn query_key(zip_code: &str, service_type: Option<&str>) -> String {
    let zip = zip_code.trim();
    let service = service_type
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("all");
    format!("{zip}-{service}")
}

/// What: Run a search for the current input, consulting the cache first.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `search_req_tx`: Channel to the background search worker.
///
/// Details:
/// - Empty postal code fails fast into the error slot; nothing is sent.
/// - A cache hit republishes the stored sequence synchronously: no request,
///   no loading indicator, no id allocation.
/// - A miss allocates a fresh monotonic id, marks it as the latest, engages
///   the loading indicator, and dispatches the request. Overlapping calls
///   are neither cancelled nor queued; the id gate in the outcome handler
///   decides which response is applied.
pub fn submit_search(app: &mut AppState, search_req_tx: &mpsc::UnboundedSender<SearchRequest>) {
    let zip = app.zip_input.trim().to_string();
    if zip.is_empty() {
        app.error = Some("enter a postal code".to_string());
        return;
    }
    app.error = None;

    let key = query_key(&zip, app.service_value());
    if let Some(cached) = app.search_cache.get(&key) {
        tracing::debug!(key, "search served from cache");
        let cached = cached.to_vec();
        super::publish_results(app, cached);
        return;
    }

    let id = app.next_search_id;
    app.next_search_id += 1;
    app.latest_search_id = id;
    app.loading = true;
    tracing::info!(id, key, "search dispatched");
    let _ = search_req_tx.send(SearchRequest {
        id,
        key,
        zip_code: zip,
        service_type: app.service_value().map(str::to_string),
    });
}
