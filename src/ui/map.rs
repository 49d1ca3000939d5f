//! Map pane rendered with a ratatui canvas.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::{Block, Borders};

use crate::state::AppState;
use crate::theme::theme;

/// Zoom level from which marker labels are printed next to the glyph.
const LABEL_MIN_ZOOM: u8 = 8;

pub fn draw(frame: &mut Frame, app: &mut AppState, area: Rect) {
    let th = theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Map ")
        .border_style(Style::default().fg(th.overlay1));
    let inner = block.inner(area);
    app.map_rect = Some((inner.x, inner.y, inner.width, inner.height));
    frame.render_widget(block, area);

    let Some(engine) = app.map.as_ref() else {
        return;
    };
    let surface = engine.surface();
    let (x_bounds, y_bounds) = surface.viewport();
    let zoom = surface.zoom();

    let selected_position = app
        .selected_vendor()
        .and_then(|vendor| engine.marker_position(&vendor.id));
    let markers: Vec<(f64, f64, String, bool)> = surface
        .markers()
        .map(|m| {
            let selected = selected_position.is_some_and(|pos| {
                (pos.lat - m.position.lat).abs() < 1e-12
                    && (pos.lng - m.position.lng).abs() < 1e-12
            });
            (m.position.lng, m.position.lat, m.title.clone(), selected)
        })
        .collect();

    let canvas = Canvas::default()
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: th.overlay1,
            });
            ctx.layer();
            for (lng, lat, title, selected) in &markers {
                let color = if *selected { th.lavender } else { th.mauve };
                let glyph = if zoom >= LABEL_MIN_ZOOM {
                    format!("● {title}")
                } else {
                    "●".to_string()
                };
                ctx.print(*lng, *lat, Span::styled(glyph, Style::default().fg(color)));
            }
        });
    frame.render_widget(canvas, inner);
}
