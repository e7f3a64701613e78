//! Service layer for headless operation.
//!
//! Daemon mode drives the same renderer as the UI, but onto a surface that
//! reports through the log instead of the terminal.

use crate::error::{Result, ServiceError};
use crate::meter::{
    AccentToken, CanvasSize, GlowToken, GraphFrame, MeterEvent, MeterRenderer, MeterSurface,
    PanelState,
};
use futures_util::StreamExt;
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Nominal canvas for headless rendering: one column per history entry
const HEADLESS_CANVAS: CanvasSize = CanvasSize {
    width: 600.0,
    height: 120.0,
};

/// Surface that logs what a display would show
#[derive(Debug, Default)]
pub struct LoggingSurface {
    severity: Option<(AccentToken, GlowToken)>,
    frames: u64,
}

impl LoggingSurface {
    /// Number of graph frames painted so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl MeterSurface for LoggingSurface {
    fn canvas_size(&self) -> CanvasSize {
        HEADLESS_CANVAS
    }

    fn show_panel(&mut self, panel: &PanelState) {
        tracing::debug!(
            value = %panel.current_value,
            peak = %panel.peak_value,
            fill = panel.fill_percent,
            rotation = panel.gauge_rotation,
            "{}",
            panel.status_text
        );

        let severity = (panel.accent, panel.glow);
        if self.severity != Some(severity) {
            if panel.glow == GlowToken::Red {
                tracing::warn!(value = %panel.current_value, "{}", panel.category_text);
            } else {
                tracing::info!(value = %panel.current_value, "{}", panel.category_text);
            }
            self.severity = Some(severity);
        }
    }

    fn paint_graph(&mut self, graph: &GraphFrame) {
        self.frames += 1;
        tracing::trace!(points = graph.points.len(), "graph frame");
    }
}

/// Headless meter service
pub struct MeterService {
    renderer: MeterRenderer<LoggingSurface>,
    events: mpsc::Receiver<MeterEvent>,
    cancel: CancellationToken,
}

impl MeterService {
    pub fn new(events: mpsc::Receiver<MeterEvent>, cancel: CancellationToken) -> Self {
        Self {
            renderer: MeterRenderer::new(LoggingSurface::default()),
            events,
            cancel,
        }
    }

    /// Apply events until the source closes the queue or shutdown is requested
    pub async fn run_daemon(&mut self) -> Result<()> {
        tracing::info!("Starting meter service in daemon mode");

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                event = self.events.recv() => match event {
                    Some(event) => self.renderer.handle(event),
                    None => {
                        tracing::info!("event queue closed");
                        break;
                    }
                },
            }
        }

        let (min, max, avg) = self.renderer.history().stats();
        tracing::info!(
            readings = self.renderer.readings(),
            frames = self.renderer.surface().frames(),
            min,
            max,
            avg,
            "Meter service stopped"
        );
        Ok(())
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &MeterRenderer<LoggingSurface> {
        &self.renderer
    }
}

/// Cancel `stop` on SIGINT or SIGTERM
pub fn setup_signal_handler(stop: CancellationToken) -> Result<JoinHandle<()>> {
    let mut signals = Signals::new([SIGINT, SIGTERM])
        .map_err(|e| ServiceError::SignalError(e.to_string()))?;

    Ok(tokio::spawn(async move {
        if let Some(signal) = signals.next().await {
            tracing::info!(signal, "Received shutdown signal");
            stop.cancel();
        }
        signals.handle().close();
    }))
}
