//! Application runtime: terminal lifecycle and the async event loop.

pub mod runtime;
pub mod terminal;

pub use runtime::{LaunchOptions, run};
