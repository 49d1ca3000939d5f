//! Input handling: keyboard and mouse events from the terminal.

pub mod keys;
pub mod mouse;

pub use keys::handle_key;
pub use mouse::handle_mouse;
