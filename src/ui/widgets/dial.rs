//! Circular gauge. The arc starts at twelve o'clock and sweeps clockwise
//! through the panel's rotation angle.

use crate::meter::PanelState;
use crate::ui::palette::Palette;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
    },
};

const RADIUS: f64 = 1.0;
const BOUND: f64 = 1.25;

/// Points along the arc from 0° to `rotation` degrees, one per degree
fn arc_points(rotation: f64) -> Vec<(f64, f64)> {
    let steps = rotation.clamp(0.0, 360.0).round() as u32;
    (0..=steps)
        .map(|deg| {
            let theta = (deg as f64).to_radians();
            (RADIUS * theta.sin(), RADIUS * theta.cos())
        })
        .collect()
}

/// Render the dial
pub fn render_dial(frame: &mut Frame, area: Rect, panel: Option<&PanelState>, palette: &Palette) {
    let rotation = panel.map(|p| p.gauge_rotation).unwrap_or(0.0);
    let accent = panel
        .map(|p| palette.accent(p.accent))
        .unwrap_or(palette.reference_line);
    let arc = arc_points(rotation);
    let tip = arc.last().copied().unwrap_or((0.0, RADIUS));
    let label = format!("{:.0}°", rotation);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(" Gauge ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .marker(Marker::Braille)
        .x_bounds([-BOUND, BOUND])
        .y_bounds([-BOUND, BOUND])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: RADIUS,
                color: palette.reference_line,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &arc,
                color: accent,
            });
            ctx.draw(&CanvasLine::new(0.0, 0.0, tip.0 * 0.8, tip.1 * 0.8, accent));
            ctx.print(-0.2, -0.5, label.clone());
        });

    frame.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_sweeps_clockwise_from_top() {
        let arc = arc_points(90.0);
        assert_eq!(arc.len(), 91);
        assert_eq!(arc[0], (0.0, 1.0));
        let (x, y) = arc[90];
        assert!((x - 1.0).abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_full_arc() {
        assert_eq!(arc_points(0.0).len(), 1);
        assert_eq!(arc_points(360.0).len(), 361);
        assert_eq!(arc_points(500.0).len(), 361);
    }
}
