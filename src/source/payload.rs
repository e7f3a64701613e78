//! Wire decoding for reading payloads.
//!
//! A payload is either a bare reading object
//! `{"db": 45, "max_db": 80, "classification": "Moderate Noise"}` or an event
//! envelope `["db_update", {...}]` as emitted by event-style push servers.

use crate::error::SourceError;
use crate::meter::Reading;
use serde::Deserialize;

/// Event name carried by reading envelopes
pub const READING_EVENT: &str = "db_update";

#[derive(Deserialize)]
#[serde(untagged)]
enum Wire {
    Envelope(String, serde_json::Value),
    Bare(Reading),
}

/// Decode one payload.
///
/// Returns `Ok(None)` for envelopes naming another event.
pub fn decode_reading(payload: &[u8]) -> Result<Option<Reading>, SourceError> {
    let wire: Wire = serde_json::from_slice(payload)
        .map_err(|e| SourceError::DecodeError(e.to_string()))?;

    match wire {
        Wire::Bare(reading) => Ok(Some(reading)),
        Wire::Envelope(event, _) if event != READING_EVENT => Ok(None),
        Wire::Envelope(_, body) => serde_json::from_value(body)
            .map(Some)
            .map_err(|e| SourceError::DecodeError(e.to_string())),
    }
}
