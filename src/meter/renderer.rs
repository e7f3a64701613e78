//! The live meter renderer.
//!
//! Owns the rolling history and reflects every event onto a
//! [`MeterSurface`]. One renderer exists per surface and it is driven from a
//! single task, so events are applied in the order they arrive.

use crate::meter::graph::GraphFrame;
use crate::meter::history::History;
use crate::meter::reading::{MeterEvent, Reading};
use crate::meter::surface::{MeterSurface, PanelState};

pub struct MeterRenderer<S: MeterSurface> {
    surface: S,
    history: History,
    readings: u64,
}

impl<S: MeterSurface> MeterRenderer<S> {
    /// Create the renderer and paint the initial (flat) graph
    pub fn new(surface: S) -> Self {
        let mut renderer = Self {
            surface,
            history: History::new(),
            readings: 0,
        };
        renderer.draw_graph();
        renderer
    }

    pub fn handle(&mut self, event: MeterEvent) {
        match event {
            MeterEvent::ReadingReceived(reading) => self.on_reading(&reading),
            MeterEvent::ViewportResized => self.on_resize(),
        }
    }

    /// Apply one reading: panel first, then history, then graph
    pub fn on_reading(&mut self, reading: &Reading) {
        let panel = PanelState::from_reading(reading);
        self.surface.show_panel(&panel);

        self.history.push(reading.db);
        self.readings += 1;
        tracing::trace!(db = reading.db, max_db = reading.max_db, "reading applied");

        self.draw_graph();
    }

    /// Re-project the unchanged history onto the current surface size
    pub fn on_resize(&mut self) {
        self.draw_graph();
    }

    pub fn draw_graph(&mut self) {
        let size = self.surface.canvas_size();
        let frame = GraphFrame::project(&self.history, size);
        self.surface.paint_graph(&frame);
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of readings applied since start
    pub fn readings(&self) -> u64 {
        self.readings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::graph::CanvasSize;
    use crate::meter::history::HISTORY_LENGTH;
    use crate::meter::severity::AccentToken;
    use crate::meter::surface::MockMeterSurface;
    use mockall::Sequence;
    use std::sync::{Arc, Mutex};

    fn quiet_surface() -> MockMeterSurface {
        let mut surface = MockMeterSurface::new();
        surface
            .expect_canvas_size()
            .return_const(CanvasSize::new(120.0, 40.0));
        surface.expect_show_panel().return_const(());
        surface.expect_paint_graph().return_const(());
        surface
    }

    #[test]
    fn test_initialize_draws_flat_baseline() {
        let mut surface = MockMeterSurface::new();
        surface
            .expect_canvas_size()
            .times(1)
            .return_const(CanvasSize::new(120.0, 40.0));
        surface
            .expect_paint_graph()
            .times(1)
            .withf(|frame| frame.points.iter().all(|&(_, y)| y == 40.0))
            .return_const(());
        surface.expect_show_panel().never();

        let renderer = MeterRenderer::new(surface);
        assert!(renderer.history().iter().all(|v| v == 0.0));
        assert_eq!(renderer.readings(), 0);
    }

    #[test]
    fn test_reading_updates_panel_then_graph() {
        let mut seq = Sequence::new();
        let mut surface = MockMeterSurface::new();
        surface
            .expect_canvas_size()
            .return_const(CanvasSize::new(120.0, 40.0));
        surface
            .expect_paint_graph()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        surface
            .expect_show_panel()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|panel| {
                panel.current_value == "45"
                    && panel.peak_value == "80"
                    && panel.status_text == "Status: Moderate Noise"
                    && panel.fill_percent == 37.5
                    && panel.gauge_rotation == 135.0
                    && panel.accent == AccentToken::Green
            })
            .return_const(());
        surface
            .expect_paint_graph()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|frame| frame.points.last() == Some(&(120.0, 40.0 * (1.0 - 45.0 / 120.0))))
            .return_const(());

        let mut renderer = MeterRenderer::new(surface);
        renderer.handle(MeterEvent::ReadingReceived(Reading::new(
            45.0,
            80.0,
            "Moderate Noise",
        )));

        assert_eq!(renderer.history().latest(), Some(45.0));
        assert_eq!(renderer.readings(), 1);
    }

    #[test]
    fn test_history_stays_fixed_length_in_order() {
        let mut renderer = MeterRenderer::new(quiet_surface());
        for v in 1..=HISTORY_LENGTH + 1 {
            renderer.on_reading(&Reading::new(v as f64, v as f64, "Quiet / Low"));
            assert_eq!(renderer.history().len(), HISTORY_LENGTH);
        }

        let expected: Vec<f64> = (2..=HISTORY_LENGTH + 1).map(|v| v as f64).collect();
        assert_eq!(renderer.history().iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_resize_reprojects_without_touching_history() {
        let sizes = Arc::new(Mutex::new(vec![
            CanvasSize::new(100.0, 50.0),
            CanvasSize::new(100.0, 50.0),
            CanvasSize::new(300.0, 90.0),
        ]));
        let painted = Arc::new(Mutex::new(Vec::new()));

        let mut surface = MockMeterSurface::new();
        let next_sizes = sizes.clone();
        surface
            .expect_canvas_size()
            .returning(move || next_sizes.lock().unwrap().remove(0));
        surface.expect_show_panel().return_const(());
        let sink = painted.clone();
        surface
            .expect_paint_graph()
            .returning(move |frame| sink.lock().unwrap().push(frame.clone()));

        let mut renderer = MeterRenderer::new(surface);
        renderer.on_reading(&Reading::new(60.0, 60.0, "Moderate Noise"));
        let before: Vec<f64> = renderer.history().iter().collect();

        renderer.handle(MeterEvent::ViewportResized);

        assert_eq!(renderer.history().iter().collect::<Vec<_>>(), before);
        let frames = painted.lock().unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].size, CanvasSize::new(300.0, 90.0));
        assert_eq!(frames[2].points.last(), Some(&(300.0, 45.0)));
        assert_eq!(frames[1].points.last(), Some(&(100.0, 25.0)));
    }
}
