//! Keyboard handling, dispatched by focused element.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::logic;
use crate::state::{AppState, Focus, LookupRequest, SearchRequest};

/// What: Apply a key press to the application state.
///
/// Inputs:
/// - `app`: Mutable application state.
/// - `key`: The pressed key (press events only; repeats and releases are
///   filtered upstream).
/// - `search_req_tx`, `lookup_req_tx`: Channels for submissions.
///
/// Output:
/// - `true` when the application should exit.
pub fn handle_key(
    app: &mut AppState,
    key: KeyEvent,
    search_req_tx: &mpsc::UnboundedSender<SearchRequest>,
    lookup_req_tx: &mpsc::UnboundedSender<LookupRequest>,
) -> bool {
    if key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return true;
    }
    match key.code {
        KeyCode::Tab => {
            app.focus = next_focus(app.focus);
            return false;
        }
        KeyCode::BackTab => {
            app.focus = prev_focus(app.focus);
            return false;
        }
        _ => {}
    }
    match app.focus {
        Focus::Zip => handle_zip_key(app, key, search_req_tx, lookup_req_tx),
        Focus::Service => handle_service_key(app, key, search_req_tx),
        Focus::Results => handle_results_key(app, key),
    }
    false
}

fn next_focus(focus: Focus) -> Focus {
    match focus {
        Focus::Zip => Focus::Service,
        Focus::Service => Focus::Results,
        Focus::Results => Focus::Zip,
    }
}

fn prev_focus(focus: Focus) -> Focus {
    match focus {
        Focus::Zip => Focus::Results,
        Focus::Service => Focus::Zip,
        Focus::Results => Focus::Service,
    }
}

/// Byte offset of the character index `caret` in `text`.
fn byte_index(text: &str, caret: usize) -> usize {
    text.char_indices()
        .nth(caret)
        .map_or(text.len(), |(i, _)| i)
}

fn handle_zip_key(
    app: &mut AppState,
    key: KeyEvent,
    search_req_tx: &mpsc::UnboundedSender<SearchRequest>,
    lookup_req_tx: &mpsc::UnboundedSender<LookupRequest>,
) {
    match key.code {
        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            logic::submit_lookup(app, lookup_req_tx);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let at = byte_index(&app.zip_input, app.zip_caret);
            app.zip_input.insert(at, c);
            app.zip_caret += 1;
        }
        KeyCode::Backspace => {
            if app.zip_caret > 0 {
                app.zip_caret -= 1;
                let at = byte_index(&app.zip_input, app.zip_caret);
                app.zip_input.remove(at);
            }
        }
        KeyCode::Left => {
            app.zip_caret = app.zip_caret.saturating_sub(1);
        }
        KeyCode::Right => {
            let len = app.zip_input.chars().count();
            app.zip_caret = (app.zip_caret + 1).min(len);
        }
        KeyCode::Enter => {
            logic::submit_search(app, search_req_tx);
        }
        _ => {}
    }
}

fn handle_service_key(
    app: &mut AppState,
    key: KeyEvent,
    search_req_tx: &mpsc::UnboundedSender<SearchRequest>,
) {
    match key.code {
        KeyCode::Left | KeyCode::Up => app.cycle_service(-1),
        KeyCode::Right | KeyCode::Down => app.cycle_service(1),
        KeyCode::Enter => logic::submit_search(app, search_req_tx),
        _ => {}
    }
}

fn handle_results_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Up => {
            if !app.results.is_empty() && app.selected > 0 {
                app.selected -= 1;
                app.list_state.select(Some(app.selected));
            }
        }
        KeyCode::Down => {
            if !app.results.is_empty() && app.selected + 1 < app.results.len() {
                app.selected += 1;
                app.list_state.select(Some(app.selected));
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            // The toggle only exists for vendors with reviews beyond the
            // primary one.
            if let Some(vendor) = app.selected_vendor()
                && vendor.has_extra_reviews()
            {
                let id = vendor.id.clone();
                logic::toggle_reviews(app, &id);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Review, Vendor};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn channels() -> (
        mpsc::UnboundedSender<SearchRequest>,
        mpsc::UnboundedReceiver<SearchRequest>,
        mpsc::UnboundedSender<LookupRequest>,
        mpsc::UnboundedReceiver<LookupRequest>,
    ) {
        let (stx, srx) = mpsc::unbounded_channel();
        let (ltx, lrx) = mpsc::unbounded_channel();
        (stx, srx, ltx, lrx)
    }

    fn review(text: &str) -> Review {
        Review {
            author: "A".into(),
            rating: 5,
            text: text.into(),
            relative_time_description: "a week ago".into(),
        }
    }

    fn vendor_with_reviews(id: &str, reviews: Vec<Review>) -> Vendor {
        Vendor {
            id: id.into(),
            name: "A".into(),
            address: String::new(),
            rating: 4.0,
            reviews_count: reviews.len() as u64,
            phone: None,
            website: None,
            reviews,
            latitude: None,
            longitude: None,
        }
    }

    /// What: Typing into the postal field inserts at the caret, including in
    /// the middle of the text.
    #[tokio::test]
    async fn zip_editing_respects_caret() {
        let mut app = AppState::default();
        let (stx, _srx, ltx, _lrx) = channels();
        for c in "1500001".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)), &stx, &ltx);
        }
        for _ in 0..4 {
            handle_key(&mut app, key(KeyCode::Left), &stx, &ltx);
        }
        handle_key(&mut app, key(KeyCode::Char('-')), &stx, &ltx);
        assert_eq!(app.zip_input, "150-0001");

        handle_key(&mut app, key(KeyCode::Backspace), &stx, &ltx);
        assert_eq!(app.zip_input, "1500001");
    }

    /// What: Enter in the postal field submits a search; Ctrl+L submits a
    /// location lookup.
    #[tokio::test]
    async fn zip_submissions_dispatch() {
        let mut app = AppState::with_config(crate::config::Config::default());
        app.zip_input = "150-0001".into();
        app.zip_caret = 8;
        let (stx, mut srx, ltx, mut lrx) = channels();

        handle_key(&mut app, key(KeyCode::Enter), &stx, &ltx);
        assert!(srx.try_recv().is_ok());

        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL),
            &stx,
            &ltx,
        );
        assert!(lrx.try_recv().is_ok());
    }

    /// What: Esc and Ctrl+C request exit; Tab cycles focus forward.
    #[tokio::test]
    async fn exit_and_focus_cycling() {
        let mut app = AppState::default();
        let (stx, _srx, ltx, _lrx) = channels();

        assert!(handle_key(&mut app, key(KeyCode::Esc), &stx, &ltx));
        assert!(handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &stx,
            &ltx,
        ));

        assert_eq!(app.focus, Focus::Zip);
        handle_key(&mut app, key(KeyCode::Tab), &stx, &ltx);
        assert_eq!(app.focus, Focus::Service);
        handle_key(&mut app, key(KeyCode::Tab), &stx, &ltx);
        assert_eq!(app.focus, Focus::Results);
        handle_key(&mut app, key(KeyCode::BackTab), &stx, &ltx);
        assert_eq!(app.focus, Focus::Service);
    }

    /// What: In the results list, Enter toggles reviews only for vendors
    /// that have more than one.
    #[tokio::test]
    async fn results_toggle_needs_extra_reviews() {
        let mut app = AppState::default();
        app.focus = Focus::Results;
        app.results = vec![
            vendor_with_reviews("single", vec![review("only one")]),
            vendor_with_reviews("multi", vec![review("first"), review("second")]),
        ];
        app.reset_selection();
        let (stx, _srx, ltx, _lrx) = channels();

        handle_key(&mut app, key(KeyCode::Enter), &stx, &ltx);
        assert!(!app.is_expanded("single"));

        handle_key(&mut app, key(KeyCode::Down), &stx, &ltx);
        handle_key(&mut app, key(KeyCode::Enter), &stx, &ltx);
        assert!(app.is_expanded("multi"));
        handle_key(&mut app, key(KeyCode::Char(' ')), &stx, &ltx);
        assert!(!app.is_expanded("multi"));
    }
}
