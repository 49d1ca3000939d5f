//! Rendering: results list on the left, search panel and map on the right.

pub mod map;
pub mod results;
pub mod search_panel;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::state::AppState;

/// Frames used by the loading spinner.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Draw the whole UI and record the clickable pane rectangles.
pub fn draw(frame: &mut Frame, app: &mut AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(frame.area());
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(columns[1]);

    results::draw(frame, app, columns[0]);
    search_panel::draw(frame, app, right[0]);
    map::draw(frame, app, right[1]);
}
