//! Application state management for the TUI.
//!
//! This module owns the meter renderer together with the UI-only state
//! around it: help overlay, link status and status messages.

use crate::meter::{MeterEvent, MeterRenderer};
use crate::source::LinkState;
use crate::ui::surface::TerminalSurface;
use chrono::{DateTime, Local};
use ratatui::layout::Rect;

/// Application state
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// Show help panel
    pub show_help: bool,
    renderer: MeterRenderer<TerminalSurface>,
    link: LinkState,
    source_label: String,
    source_running: bool,
    last_reading_at: Option<DateTime<Local>>,
    status_message: Option<String>,
}

impl App {
    /// Create a new application state; paints the initial graph
    pub fn new(surface: TerminalSurface, link: LinkState, source_label: String) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            renderer: MeterRenderer::new(surface),
            link,
            status_message: Some(format!("Listening on {}", source_label)),
            source_label,
            source_running: true,
            last_reading_at: None,
        }
    }

    /// Feed one event to the renderer
    pub fn handle_event(&mut self, event: MeterEvent) {
        if matches!(event, MeterEvent::ReadingReceived(_)) {
            self.last_reading_at = Some(Local::now());
        }
        self.renderer.handle(event);
    }

    /// Adopt a new terminal size and re-project the graph
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.renderer
            .surface_mut()
            .set_viewport(Rect::new(0, 0, columns, rows));
        self.handle_event(MeterEvent::ViewportResized);
    }

    /// Record that the source closed its end of the event queue
    pub fn source_finished(&mut self) {
        if self.source_running {
            self.source_running = false;
            self.status_message = Some(format!("Source {} stopped", self.source_label));
            tracing::info!(source = %self.source_label, "event queue closed");
        }
    }

    /// Toggle help panel
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn renderer(&self) -> &MeterRenderer<TerminalSurface> {
        &self.renderer
    }

    pub fn surface(&self) -> &TerminalSurface {
        self.renderer.surface()
    }

    pub fn is_linked(&self) -> bool {
        self.source_running && self.link.is_connected()
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn last_reading_at(&self) -> Option<DateTime<Local>> {
        self.last_reading_at
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::{AccentToken, Reading};
    use crate::ui::palette::Palette;

    fn app() -> App {
        let mut app = App::new(
            TerminalSurface::new(Palette::default()),
            LinkState::default(),
            "replay:test".to_string(),
        );
        app.resize(80, 30);
        app
    }

    #[test]
    fn test_initial_graph_is_flat() {
        let app = app();
        let graph = app.surface().graph().unwrap();
        assert!(graph.points.iter().all(|&(_, y)| y == graph.size.height));
        assert!(app.surface().panel().is_none());
        assert!(app.last_reading_at().is_none());
    }

    #[test]
    fn test_reading_reaches_surface() {
        let mut app = app();
        app.handle_event(MeterEvent::ReadingReceived(Reading::new(45.0, 80.0, "Moderate Noise")));

        let panel = app.surface().panel().unwrap();
        assert_eq!(panel.current_value, "45");
        assert_eq!(panel.accent, AccentToken::Green);
        assert_eq!(app.renderer().readings(), 1);
        assert!(app.last_reading_at().is_some());
    }

    #[test]
    fn test_resize_reprojects_graph() {
        let mut app = app();
        app.handle_event(MeterEvent::ReadingReceived(Reading::new(60.0, 60.0, "Moderate Noise")));
        let before = app.surface().graph().unwrap().size;

        app.resize(160, 50);

        let graph = app.surface().graph().unwrap();
        assert_ne!(graph.size, before);
        assert_eq!(graph.points.last(), Some(&(graph.size.width, graph.size.height / 2.0)));
        assert_eq!(app.renderer().history().latest(), Some(60.0));
    }

    #[test]
    fn test_source_finished_drops_link() {
        let link = LinkState::default();
        link.set(true);
        let mut app = App::new(TerminalSurface::new(Palette::default()), link, "x".to_string());
        assert!(app.is_linked());
        app.source_finished();
        assert!(!app.is_linked());
        assert_eq!(app.status_message(), Some("Source x stopped"));
    }
}
