//! Tracing subscriber setup.
//!
//! The interactive UI owns the terminal, so in that mode log lines go to the
//! configured file or nowhere. Daemon mode logs to stderr unless a file is
//! configured. `RUST_LOG` takes precedence over the configured level.

use crate::cli::RunMode;
use crate::config::LoggingConfig;
use crate::error::{Result, ServiceError};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber
pub fn init(config: &LoggingConfig, mode: RunMode) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ServiceError::InitializationError(format!("log filter: {}", e)))?;

    let (writer, ansi) = match (&config.file, mode) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        (None, RunMode::Interactive) => (BoxMakeWriter::new(std::io::sink), false),
        (None, RunMode::Daemon) => (
            BoxMakeWriter::new(std::io::stderr),
            config.colored && atty::is(atty::Stream::Stderr),
        ),
    };

    let layer = fmt::layer().with_writer(writer).with_ansi(ansi).with_target(false);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };

    installed.map_err(|e| ServiceError::InitializationError(format!("logging: {}", e)))?;
    Ok(())
}
