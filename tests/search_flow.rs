//! End-to-end search flow against a stub backend: submission, caching,
//! publication, and the error taxonomy.

use httptest::{Expectation, Server, matchers::*, responders::*};
use tokio::sync::mpsc;

use fixmap::app::runtime::handlers::handle_search_outcome;
use fixmap::config::Config;
use fixmap::logic;
use fixmap::sources::repairers::fetch_repairers;
use fixmap::state::{AppState, SearchOutcome, Vendor};

fn repairer_json(id: &str, lat: f64, lng: f64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Vendor {id}"),
        "address": "Jingumae 1-1-1, Shibuya",
        "rating": 4.2,
        "reviews_count": 10,
        "latitude": lat,
        "longitude": lng,
        "reviews": [{
            "author": "A",
            "rating": 5,
            "text": "fixed our unit the same day",
            "relative_time_description": "1 week ago"
        }]
    })
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

/// Submit the current input and, when a request was dispatched, serve it the
/// way the search worker does.
async fn run_search(app: &mut AppState, base_url: &str) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    logic::submit_search(app, &tx);
    if let Ok(req) = rx.try_recv() {
        let result = fetch_repairers(base_url, &req.zip_code, req.service_type.as_deref()).await;
        handle_search_outcome(
            app,
            SearchOutcome {
                id: req.id,
                key: req.key,
                result,
            },
        );
    }
}

#[tokio::test]
async fn first_search_publishes_results_and_markers() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/api/repairers"),
            request::query(url_decoded(contains(("zip_code", "150-0001")))),
        ])
        .respond_with(json_encoded(serde_json::json!({
            "repairers": [repairer_json("v1", 35.66, 139.70)]
        }))),
    );

    let mut app = AppState::with_config(Config::default());
    app.zip_input = "150-0001".into();
    run_search(&mut app, &server.url_str("/")).await;

    assert!(!app.loading);
    assert!(app.error.is_none());
    assert_eq!(app.results.len(), 1);
    assert_eq!(app.results[0].name, "Vendor v1");
    assert_eq!(app.map.as_ref().expect("map").marker_count(), 1);
    assert!(app.search_cache.get("150-0001-all").is_some());
}

#[tokio::test]
async fn repeated_search_is_served_from_cache() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/repairers"))
            .times(1)
            .respond_with(json_encoded(serde_json::json!({
                "repairers": [repairer_json("v1", 35.66, 139.70)]
            }))),
    );

    let mut app = AppState::with_config(Config::default());
    app.zip_input = "150-0001".into();
    run_search(&mut app, &server.url_str("/")).await;
    run_search(&mut app, &server.url_str("/")).await;

    // Second submission consumed no id and went nowhere near the network;
    // the server expectation of exactly one hit verifies the latter.
    assert_eq!(app.next_search_id, 2);
    assert_eq!(app.results.len(), 1);
    assert_eq!(app.map.as_ref().expect("map").marker_count(), 1);
}

#[tokio::test]
async fn service_filter_reaches_the_backend_and_keys_the_cache() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/api/repairers"),
            request::query(url_decoded(contains(("service_type", "修理")))),
        ])
        .respond_with(json_encoded(serde_json::json!({ "repairers": [] }))),
    );

    let mut app = AppState::with_config(Config::default());
    app.zip_input = "150-0001".into();
    app.cycle_service(2); // Repair
    run_search(&mut app, &server.url_str("/")).await;

    assert!(app.search_cache.get("150-0001-修理").is_some());
    assert!(app.search_cache.get("150-0001-all").is_none());
}

#[tokio::test]
async fn server_error_surfaces_status_and_keeps_prior_results() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::query(url_decoded(contains((
            "zip_code", "150-0001",
        )))))
        .respond_with(json_encoded(serde_json::json!({
            "repairers": [repairer_json("v1", 35.66, 139.70)]
        }))),
    );
    server.expect(
        Expectation::matching(request::query(url_decoded(contains(("zip_code", "999")))))
            .respond_with(status_code(500).body("internal error")),
    );

    let mut app = AppState::with_config(Config::default());
    app.zip_input = "150-0001".into();
    run_search(&mut app, &server.url_str("/")).await;
    assert_eq!(app.results.len(), 1);

    app.zip_input = "999".into();
    run_search(&mut app, &server.url_str("/")).await;

    let error = app.error.as_deref().expect("error surfaced");
    assert!(error.contains("500"));
    assert!(error.contains("internal error"));
    // The failed search touched neither the published results, the markers,
    // nor the cache.
    assert_eq!(app.results.len(), 1);
    assert_eq!(app.map.as_ref().expect("map").marker_count(), 1);
    assert!(app.search_cache.get("999-all").is_none());
}

#[tokio::test]
async fn server_error_excerpt_is_truncated() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/repairers"))
            .respond_with(status_code(502).body("x".repeat(300))),
    );

    let mut app = AppState::with_config(Config::default());
    app.zip_input = "150-0001".into();
    run_search(&mut app, &server.url_str("/")).await;

    let error = app.error.as_deref().expect("error surfaced");
    assert!(error.contains("502"));
    assert!(error.matches('x').count() <= 100);
}

#[tokio::test]
async fn backend_reported_error_is_surfaced() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/repairers")).respond_with(
            json_encoded(serde_json::json!({ "error": "places api quota exhausted" })),
        ),
    );

    let mut app = AppState::with_config(Config::default());
    app.zip_input = "150-0001".into();
    run_search(&mut app, &server.url_str("/")).await;

    assert_eq!(
        app.error.as_deref(),
        Some("search failed: places api quota exhausted")
    );
    assert!(app.results.is_empty());
}

#[tokio::test]
async fn last_dispatched_search_wins_regardless_of_arrival_order() {
    let mut app = AppState::with_config(Config::default());
    let (tx, mut rx) = mpsc::unbounded_channel();

    app.zip_input = "150-0001".into();
    logic::submit_search(&mut app, &tx);
    app.zip_input = "160-0001".into();
    logic::submit_search(&mut app, &tx);
    let first = rx.try_recv().expect("first request");
    let second = rx.try_recv().expect("second request");

    // The newer search resolves first; the older one trickles in afterwards
    // and must be discarded.
    handle_search_outcome(
        &mut app,
        SearchOutcome {
            id: second.id,
            key: second.key,
            result: Ok(vec![vendor("new", 35.69, 139.70)]),
        },
    );
    handle_search_outcome(
        &mut app,
        SearchOutcome {
            id: first.id,
            key: first.key,
            result: Ok(vec![vendor("old", 34.0, 135.0)]),
        },
    );

    assert_eq!(app.results.len(), 1);
    assert_eq!(app.results[0].id, "new");
    assert!(!app.loading);
    assert!(app.search_cache.get("150-0001-all").is_none());
}
