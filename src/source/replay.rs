//! Line-oriented replay source.
//!
//! Each non-empty line is one reading: either a JSON payload as accepted on
//! the wire, or a bare level such as `72.4`. Bare levels are treated the way
//! the metering source treats raw measurements: rounded half to even,
//! clamped to the scale, folded into a running peak and classified.

use crate::config::ReplayConfig;
use crate::error::{Result, SourceError};
use crate::meter::scale;
use crate::meter::{MeterEvent, Reading, Severity};
use crate::source::{LinkState, ReadingSource, deliver, payload};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Path meaning "read standard input"
const STDIN_PATH: &str = "-";

pub struct ReplaySource {
    path: PathBuf,
    config: ReplayConfig,
}

/// Turns replay lines into readings, tracking the session peak
#[derive(Debug, Default)]
pub struct LineParser {
    peak: f64,
}

impl LineParser {
    pub fn parse(&mut self, line: &str) -> std::result::Result<Option<Reading>, SourceError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        if let Ok(level) = line.parse::<f64>() {
            if !level.is_finite() {
                return Err(SourceError::DecodeError(format!("non-finite level `{}`", line)));
            }
            let db = scale::clamp_db(level.round_ties_even());
            self.peak = self.peak.max(db);
            let label = Severity::classify(db).label().unwrap_or_default();
            return Ok(Some(Reading::new(db, self.peak, label)));
        }

        payload::decode_reading(line.as_bytes())
    }
}

impl ReplaySource {
    pub fn new(path: PathBuf, config: ReplayConfig) -> Self {
        Self { path, config }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == STDIN_PATH
    }

    async fn open(&self) -> Result<Box<dyn AsyncBufRead + Send + Unpin>> {
        if self.is_stdin() {
            return Ok(Box::new(BufReader::new(tokio::io::stdin())));
        }
        let file = tokio::fs::File::open(&self.path)
            .await
            .map_err(|e| SourceError::ReplayError(format!("{}: {}", self.path.display(), e)))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

#[async_trait]
impl ReadingSource for ReplaySource {
    fn describe(&self) -> String {
        if self.is_stdin() {
            "replay:stdin".to_string()
        } else {
            format!("replay:{}", self.path.display())
        }
    }

    async fn run(
        self: Box<Self>,
        events: mpsc::Sender<MeterEvent>,
        link: LinkState,
        cancel: CancellationToken,
    ) -> Result<()> {
        let mut parser = LineParser::default();
        let mut ticker = tokio::time::interval(Duration::from_millis(self.config.interval_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let mut lines = self.open().await?.lines();
            link.set(true);
            let mut line_no = 0usize;
            let mut delivered = 0usize;

            loop {
                let next = tokio::select! {
                    _ = cancel.cancelled() => return Ok(()),
                    next = lines.next_line() => next,
                };
                let Some(line) = next.map_err(|e| SourceError::ReplayError(e.to_string()))? else {
                    break;
                };
                line_no += 1;

                match parser.parse(&line) {
                    Ok(Some(reading)) => {
                        tokio::select! {
                            _ = cancel.cancelled() => return Ok(()),
                            _ = ticker.tick() => {}
                        }
                        if !deliver(&events, reading).await {
                            return Ok(());
                        }
                        delivered += 1;
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!(line = line_no, error = %e, "skipping replay line"),
                }
            }

            if !self.config.repeat || self.is_stdin() {
                tracing::info!(lines = line_no, "replay input exhausted");
                return Ok(());
            }
            if delivered == 0 {
                tracing::warn!(lines = line_no, "replay input holds no readings, not repeating");
                return Ok(());
            }
            tracing::debug!("replay restarting from the top");
        }
    }
}
