//! The main select loop: terminal events, worker outcomes, and ticks.

use crossterm::event::{Event as CEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::app::runtime::channels::LoopChannels;
use crate::app::runtime::handlers;
use crate::events;
use crate::logic;
use crate::state::AppState;
use crate::ui;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Drive the application until the user quits.
///
/// Inputs:
/// - `terminal`: Ratatui terminal to draw into.
/// - `app`: Mutable application state.
/// - `channels`: All runtime channel ends; receivers are polled here.
///
/// Details:
/// - Every branch mutates state and falls through to a redraw. The loop ends
///   when a key handler requests exit or every input channel is closed.
pub async fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    channels: &mut LoopChannels,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        tokio::select! {
            Some(ev) = channels.event_rx.recv() => match ev {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    let exit = events::handle_key(
                        app,
                        key,
                        &channels.search_req_tx,
                        &channels.lookup_req_tx,
                    );
                    if exit {
                        break;
                    }
                }
                CEvent::Mouse(mouse) => {
                    events::handle_mouse(app, mouse);
                }
                _ => {}
            },
            Some(outcome) = channels.search_res_rx.recv() => {
                handlers::handle_search_outcome(app, outcome);
            }
            Some(outcome) = channels.lookup_res_rx.recv() => {
                logic::apply_lookup_outcome(app, &outcome);
            }
            Some(()) = channels.tick_rx.recv() => {
                handlers::handle_tick(app);
            }
            else => break,
        }
    }
    Ok(())
}
