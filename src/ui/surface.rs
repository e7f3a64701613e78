//! Terminal-backed meter surface.
//!
//! Holds the latest panel state and graph frame; the draw pass reads them
//! back. The canvas size is derived from the current viewport through the
//! same layout the draw pass uses.

use crate::meter::{CanvasSize, GraphFrame, MeterSurface, PanelState};
use crate::ui::layout;
use crate::ui::palette::Palette;
use ratatui::layout::Rect;

pub struct TerminalSurface {
    viewport: Rect,
    palette: Palette,
    panel: Option<PanelState>,
    graph: Option<GraphFrame>,
}

impl TerminalSurface {
    pub fn new(palette: Palette) -> Self {
        Self {
            viewport: Rect::default(),
            palette,
            panel: None,
            graph: None,
        }
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Latest panel, `None` until the first reading
    pub fn panel(&self) -> Option<&PanelState> {
        self.panel.as_ref()
    }

    pub fn graph(&self) -> Option<&GraphFrame> {
        self.graph.as_ref()
    }
}

impl MeterSurface for TerminalSurface {
    fn canvas_size(&self) -> CanvasSize {
        layout::canvas_size(layout::split(self.viewport).graph)
    }

    fn show_panel(&mut self, panel: &PanelState) {
        self.panel = Some(panel.clone());
    }

    fn paint_graph(&mut self, graph: &GraphFrame) {
        self.graph = Some(graph.clone());
    }
}
