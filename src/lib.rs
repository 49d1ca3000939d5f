//! fixmap: a terminal client for finding air-conditioner repair vendors near
//! a Japanese postal code.
//!
//! The left pane lists vendors returned by the search backend; the right pane
//! hosts the search controls and a canvas map whose markers always mirror the
//! published result list. Results are cached per normalized query for the
//! session, and a postal-code lookup can recenter the map without running a
//! search.

pub mod app;
pub mod config;
pub mod events;
pub mod logic;
pub mod map;
pub mod sources;
pub mod state;
pub mod theme;
pub mod ui;
pub mod util;
