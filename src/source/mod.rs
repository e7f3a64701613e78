//! Reading sources feeding the renderer.
//!
//! A source owns the push channel and only ever sends
//! [`MeterEvent::ReadingReceived`] into the event queue; it never touches
//! display state.

pub mod mqtt;
pub mod payload;
pub mod replay;

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::Result;
use crate::meter::{MeterEvent, Reading};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub use mqtt::MqttSource;
pub use replay::ReplaySource;

/// Shared view of whether the push channel is currently up
#[derive(Debug, Clone, Default)]
pub struct LinkState(Arc<AtomicBool>);

impl LinkState {
    pub fn set(&self, connected: bool) {
        self.0.store(connected, Ordering::SeqCst);
    }

    pub fn is_connected(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Trait for anything that delivers readings
#[async_trait]
pub trait ReadingSource: Send {
    /// Short human-readable description for the status bar
    fn describe(&self) -> String;

    /// Deliver readings until the input ends or `cancel` fires
    async fn run(
        self: Box<Self>,
        events: mpsc::Sender<MeterEvent>,
        link: LinkState,
        cancel: CancellationToken,
    ) -> Result<()>;
}

/// Build the source selected by the CLI
pub fn from_cli(config: &AppConfig, cli: &Cli) -> Box<dyn ReadingSource> {
    match &cli.replay {
        Some(path) => Box::new(ReplaySource::new(path.clone(), config.replay.clone())),
        None => Box::new(MqttSource::new(config.mqtt.clone(), config.service.clone())),
    }
}

/// Run a source on its own task
pub fn spawn(
    source: Box<dyn ReadingSource>,
    events: mpsc::Sender<MeterEvent>,
    link: LinkState,
    cancel: CancellationToken,
) -> JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let label = source.describe();
        tracing::info!(source = %label, "source started");
        let outcome = source.run(events, link.clone(), cancel).await;
        link.set(false);
        match &outcome {
            Ok(()) => tracing::info!(source = %label, "source finished"),
            Err(e) => tracing::error!(source = %label, error = %e, "source failed"),
        }
        outcome
    })
}

/// Send one reading; `false` once the consumer has gone away.
///
/// The consumer closes the queue on a normal quit, so a closed queue ends
/// the source cleanly.
pub(crate) async fn deliver(events: &mpsc::Sender<MeterEvent>, reading: Reading) -> bool {
    events.send(MeterEvent::ReadingReceived(reading)).await.is_ok()
}
