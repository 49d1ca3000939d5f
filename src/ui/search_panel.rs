//! Search panel: postal-code input, service selector, hints, and status.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::state::{AppState, Focus};
use crate::theme::theme;
use crate::ui::SPINNER_FRAMES;

/// Split `text` at the character caret into (before, at, after); the caret
/// cell is a space when it sits past the end.
fn split_at_caret(text: &str, caret: usize) -> (String, String, String) {
    let mut before = String::new();
    let mut at = String::new();
    let mut after = String::new();
    for (i, c) in text.chars().enumerate() {
        if i < caret {
            before.push(c);
        } else if i == caret {
            at.push(c);
        } else {
            after.push(c);
        }
    }
    if at.is_empty() {
        at.push(' ');
    }
    (before, at, after)
}

pub fn draw(frame: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let focus_style = |focused: bool| {
        if focused {
            Style::default().fg(th.sapphire)
        } else {
            Style::default().fg(th.overlay1)
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search ")
        .border_style(focus_style(matches!(app.focus, Focus::Zip | Focus::Service)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (before, at, after) = split_at_caret(&app.zip_input, app.zip_caret);
    let caret_style = if app.focus == Focus::Zip {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(th.text)
    };
    let zip_line = Line::from(vec![
        Span::styled("Postal code ", focus_style(app.focus == Focus::Zip)),
        Span::styled(before, Style::default().fg(th.text)),
        Span::styled(at, caret_style),
        Span::styled(after, Style::default().fg(th.text)),
    ]);

    let service_line = Line::from(vec![
        Span::styled("Service     ", focus_style(app.focus == Focus::Service)),
        Span::styled("◀ ", Style::default().fg(th.overlay1)),
        Span::styled(
            app.service_label(),
            Style::default().fg(th.lavender).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(th.overlay1)),
    ]);

    let hint_line = Line::from(Span::styled(
        "Enter search · Ctrl+L locate · Tab focus · Esc quit",
        Style::default().fg(th.subtext0),
    ));

    let status_line = if let Some(error) = &app.error {
        Line::from(Span::styled(
            error.clone(),
            Style::default().fg(th.red),
        ))
    } else if app.loading {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        Line::from(Span::styled(
            format!("{spinner} searching…"),
            Style::default().fg(th.yellow),
        ))
    } else {
        Line::default()
    };

    let lines = vec![zip_line, service_line, Line::default(), hint_line, status_line];
    frame.render_widget(Paragraph::new(lines), inner);
}
