//! Vendor results list.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::{AppState, Focus, Review, Vendor};
use crate::theme::{Theme, theme};
use crate::ui::SPINNER_FRAMES;
use crate::util::filled_stars;

/// Truncate `text` to at most `max_width` display columns, appending an
/// ellipsis when anything was cut.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn review_line(review: &Review, width: usize, th: &Theme) -> Line<'static> {
    let text = format!(
        "“{}” — {}, {}",
        review.text, review.author, review.relative_time_description
    );
    Line::from(Span::styled(
        truncate_to_width(&text, width),
        Style::default().fg(th.subtext0),
    ))
}

fn vendor_item(app: &AppState, vendor: &Vendor, width: usize, th: &Theme) -> ListItem<'static> {
    let highlighted = matches!(&app.highlight, Some((id, _)) if *id == vendor.id);
    let name_style = if highlighted {
        Style::default()
            .fg(th.base)
            .bg(th.mauve)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(th.text).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Line::from(Span::styled(vendor.name.clone(), name_style)),
        Line::from(Span::styled(
            vendor.address.clone(),
            Style::default().fg(th.subtext0),
        )),
    ];

    let stars = filled_stars(vendor.rating);
    lines.push(Line::from(vec![
        Span::styled(
            "★".repeat(stars) + &"☆".repeat(5 - stars),
            Style::default().fg(th.yellow),
        ),
        Span::styled(
            format!(" {:.1} ({} reviews)", vendor.rating, vendor.reviews_count),
            Style::default().fg(th.green),
        ),
    ]));

    if vendor.phone.is_some() || vendor.website.is_some() {
        let mut parts: Vec<String> = Vec::new();
        if let Some(phone) = &vendor.phone {
            parts.push(format!("☎ {phone}"));
        }
        if let Some(website) = &vendor.website {
            parts.push(website.clone());
        }
        lines.push(Line::from(Span::styled(
            truncate_to_width(&parts.join("  "), width),
            Style::default().fg(th.sapphire),
        )));
    }

    if let Some(primary) = vendor.reviews.first() {
        lines.push(review_line(primary, width, th));
    }
    if vendor.has_extra_reviews() {
        if app.is_expanded(&vendor.id) {
            for review in &vendor.reviews[1..] {
                lines.push(review_line(review, width, th));
            }
        } else {
            lines.push(Line::from(Span::styled(
                format!("▸ {} more reviews (Enter)", vendor.reviews.len() - 1),
                Style::default().fg(th.lavender),
            )));
        }
    }
    lines.push(Line::default());

    ListItem::new(Text::from(lines))
}

pub fn draw(frame: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Repairers ({}) ", app.results.len()))
        .border_style(if app.focus == Focus::Results {
            Style::default().fg(th.sapphire)
        } else {
            Style::default().fg(th.overlay1)
        });
    let inner = block.inner(area);
    app.results_rect = Some((inner.x, inner.y, inner.width, inner.height));
    frame.render_widget(block, area);

    if app.loading {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{spinner} searching…"),
                Style::default().fg(th.yellow),
            ))),
            inner,
        );
        return;
    }
    if app.results.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Enter a postal code to find AC repairers nearby.",
                Style::default().fg(th.subtext0),
            ))),
            inner,
        );
        return;
    }

    let width = inner.width as usize;
    let items: Vec<ListItem> = app
        .results
        .iter()
        .map(|vendor| vendor_item(app, vendor, width, &th))
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(th.overlay1).fg(th.text));
    frame.render_stateful_widget(list, inner, &mut app.list_state);
}
