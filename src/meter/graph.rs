//! Projection of the level history onto a drawing surface.
//!
//! Coordinates follow screen convention: the origin is the top-left corner
//! and y grows downwards, so `MIN_DB` sits on the bottom edge and `MAX_DB`
//! on the top edge.

use crate::meter::history::History;
use crate::meter::scale;

/// Relative heights of the two fixed reference lines
pub const HIGH_REFERENCE: f64 = 0.1;
pub const LOW_REFERENCE: f64 = 0.9;

/// Current drawing surface dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Everything needed to paint one graph frame
#[derive(Debug, Clone, PartialEq)]
pub struct GraphFrame {
    pub size: CanvasSize,
    /// y positions of the high and low reference lines
    pub reference_lines: [f64; 2],
    /// One point per history entry, oldest at x = 0
    pub points: Vec<(f64, f64)>,
}

impl GraphFrame {
    /// Project the whole history onto a surface of the given size.
    ///
    /// The x axis always spans every history entry regardless of width;
    /// values are clamped before plotting.
    pub fn project(history: &History, size: CanvasSize) -> Self {
        let last_index = history.len().saturating_sub(1).max(1) as f64;
        let points = history
            .iter()
            .enumerate()
            .map(|(index, db)| {
                let x = (index as f64 / last_index) * size.width;
                let y = size.height * (1.0 - scale::normalize(db));
                (x, y)
            })
            .collect();

        Self {
            size,
            reference_lines: [
                size.height * HIGH_REFERENCE,
                size.height * LOW_REFERENCE,
            ],
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::history::HISTORY_LENGTH;

    #[test]
    fn test_initial_history_is_flat_on_baseline() {
        let frame = GraphFrame::project(&History::new(), CanvasSize::new(300.0, 100.0));
        assert_eq!(frame.points.len(), HISTORY_LENGTH);
        assert!(frame.points.iter().all(|&(_, y)| y == 100.0));
        assert_eq!(frame.reference_lines, [10.0, 90.0]);
    }

    #[test]
    fn test_x_axis_spans_full_width() {
        let frame = GraphFrame::project(&History::new(), CanvasSize::new(40.0, 10.0));
        assert_eq!(frame.points.first().map(|p| p.0), Some(0.0));
        assert_eq!(frame.points.last().map(|p| p.0), Some(40.0));
    }

    #[test]
    fn test_clamping_above_and_below_scale() {
        let size = CanvasSize::new(200.0, 80.0);
        let plot = |db: f64| {
            let mut history = History::new();
            history.push(db);
            GraphFrame::project(&history, size)
        };

        assert_eq!(plot(150.0), plot(120.0));
        assert_eq!(plot(-10.0), plot(0.0));
        assert_eq!(plot(120.0).points.last().map(|p| p.1), Some(0.0));
    }
}
