//! Inbound measurement types.

use serde::{Deserialize, Serialize};

/// One sound-level measurement as published by the metering source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Current level (dBA)
    pub db: f64,
    /// Running peak observed by the source (dBA)
    pub max_db: f64,
    /// Severity label, also shown verbatim
    pub classification: String,
}

impl Reading {
    pub fn new(db: f64, max_db: f64, classification: impl Into<String>) -> Self {
        Self {
            db,
            max_db,
            classification: classification.into(),
        }
    }
}

/// Events driving the renderer, processed strictly in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum MeterEvent {
    /// A reading arrived over the push channel
    ReadingReceived(Reading),
    /// The drawing area changed size
    ViewportResized,
}
