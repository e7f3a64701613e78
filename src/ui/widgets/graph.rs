//! Scrolling level graph painted from a [`GraphFrame`].

use crate::meter::GraphFrame;
use crate::meter::history::HISTORY_LENGTH;
use crate::meter::AccentToken;
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Context, Line as CanvasLine},
    },
};

/// Render the history graph
pub fn render_graph(frame: &mut Frame, area: Rect, graph: Option<&GraphFrame>, palette: &Palette) {
    let block = Block::default()
        .title(format!(" Noise History (last {} readings) ", HISTORY_LENGTH))
        .title(Line::from(" 0–120 dBA ").right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(graph) = graph.filter(|g| g.size.width > 0.0 && g.size.height > 0.0) else {
        frame.render_widget(block, area);
        return;
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, graph.size.width])
        .y_bounds([0.0, graph.size.height])
        .paint(|ctx| paint(ctx, graph, palette));

    frame.render_widget(canvas, area);
}

/// Canvas y grows upwards while frame coordinates grow downwards
fn paint(ctx: &mut Context, graph: &GraphFrame, palette: &Palette) {
    let height = graph.size.height;
    let flip = |y: f64| height - y;

    // Translucent fill under the line
    for &(x, y) in &graph.points {
        ctx.draw(&CanvasLine::new(x, 0.0, x, flip(y), palette.fill_tint));
    }
    ctx.layer();

    for &y in &graph.reference_lines {
        ctx.draw(&CanvasLine::new(
            0.0,
            flip(y),
            graph.size.width,
            flip(y),
            palette.reference_line,
        ));
    }

    let line_color = palette.accent(AccentToken::Blue);
    for pair in graph.points.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];
        ctx.draw(&CanvasLine::new(x1, flip(y1), x2, flip(y2), line_color));
    }
}
