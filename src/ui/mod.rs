//! Terminal UI module using ratatui.
//!
//! This module provides the interactive terminal meter: readout, level bar,
//! dial and history graph, redrawn as readings arrive.

pub mod app;
pub mod input;
pub mod layout;
pub mod palette;
pub mod surface;
pub mod widgets;

pub use app::App;
pub use input::{InputAction, handle_input};
pub use palette::Palette;
pub use surface::TerminalSurface;

use crate::error::{Result, UiError};
use crate::meter::MeterEvent;
use ratatui::{DefaultTerminal, Frame};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio_util::sync::CancellationToken;

/// Run the interactive UI until quit or cancellation.
///
/// Blocks the calling thread; run it off the async workers. The terminal is
/// restored on every exit path.
pub fn run(
    app: App,
    events: mpsc::Receiver<MeterEvent>,
    cancel: CancellationToken,
    tick: Duration,
) -> Result<()> {
    let mut terminal =
        ratatui::try_init().map_err(|e| UiError::InitializationError(e.to_string()))?;
    let outcome = event_loop(&mut terminal, app, events, cancel, tick);
    ratatui::restore();
    outcome
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    mut app: App,
    mut events: mpsc::Receiver<MeterEvent>,
    cancel: CancellationToken,
    tick: Duration,
) -> Result<()> {
    let size = terminal
        .size()
        .map_err(|e| UiError::InitializationError(e.to_string()))?;
    app.resize(size.width, size.height);

    while !app.should_quit && !cancel.is_cancelled() {
        terminal
            .draw(|frame| draw(frame, &app))
            .map_err(|e| UiError::RenderError(e.to_string()))?;

        match handle_input(tick).map_err(|e| UiError::InputError(e.to_string()))? {
            InputAction::Quit => app.should_quit = true,
            InputAction::ToggleHelp => app.toggle_help(),
            InputAction::Resize(columns, rows) => app.resize(columns, rows),
            InputAction::None => {}
        }

        // Apply everything queued since the last tick, in arrival order
        loop {
            match events.try_recv() {
                Ok(event) => app.handle_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    app.source_finished();
                    break;
                }
            }
        }
    }

    tracing::info!(readings = app.renderer().readings(), "UI closed");
    Ok(())
}

/// Draw one frame from the surface state
fn draw(frame: &mut Frame, app: &App) {
    let surface = app.surface();
    let palette = surface.palette();
    let panel = surface.panel();
    let areas = layout::split(frame.area());

    widgets::render_status_bar(
        frame,
        areas.status,
        app.is_linked(),
        app.source_label(),
        app.renderer().readings(),
        app.last_reading_at(),
        app.renderer().history().stats(),
        app.status_message(),
    );
    widgets::render_readout(frame, areas.readout, panel, palette);
    widgets::render_dial(frame, areas.dial, panel, palette);
    widgets::render_level_bar(frame, areas.level, panel, palette);
    widgets::render_graph(frame, areas.graph, surface.graph(), palette);

    if app.show_help {
        widgets::render_help(frame, layout::centered(frame.area(), 50, 60), palette);
    }
}
