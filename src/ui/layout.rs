//! Screen layout, shared by drawing and by the canvas size reported to the
//! renderer so both always agree.

use crate::meter::CanvasSize;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Block;

/// Braille markers give 2×4 dots per terminal cell
const DOTS_PER_COLUMN: f64 = 2.0;
const DOTS_PER_ROW: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeterLayout {
    pub status: Rect,
    pub readout: Rect,
    pub dial: Rect,
    pub level: Rect,
    pub graph: Rect,
}

pub fn split(area: Rect) -> MeterLayout {
    let [status, meters, graph] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(11),
        Constraint::Min(5),
    ])
    .areas(area);

    let [readout, dial, level] = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Length(26),
        Constraint::Min(20),
    ])
    .areas(meters);

    MeterLayout {
        status,
        readout,
        dial,
        level,
        graph,
    }
}

/// Drawable resolution inside the bordered graph panel
pub fn canvas_size(graph: Rect) -> CanvasSize {
    let inner = Block::bordered().inner(graph);
    CanvasSize::new(
        inner.width as f64 * DOTS_PER_COLUMN,
        inner.height as f64 * DOTS_PER_ROW,
    )
}

/// Centered rectangle for overlays
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
