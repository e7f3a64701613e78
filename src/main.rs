//! noise-meter: live sound-level meter.
//!
//! Subscribes to `db_update` readings published over MQTT (or replays them
//! from a file) and shows them as a numeric readout, a color-coded level bar
//! and dial, and a scrolling history graph. In daemon mode the same renderer
//! reports through the log instead.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

mod cli;
mod config;
mod error;
mod logging;
mod meter;
mod service;
mod source;
mod ui;

use cli::{Cli, RunMode};
use config::AppConfig;
use service::MeterService;
use source::LinkState;
use ui::{App, Palette, TerminalSurface};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_env();
    if cli.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let (config_path, required) = cli.config_path();
    let mut config = AppConfig::load(&config_path, required)
        .with_context(|| format!("loading {}", config_path.display()))?;
    config.apply_cli_overrides(&cli);
    config.validate()?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // Fail on a bad theme before the terminal is taken over
    let palette = Palette::from_theme(&config.theme)?;

    logging::init(&config.logging, cli.mode)?;
    tracing::info!(mode = %cli.mode, config = %config_path.display(), "starting noise-meter");

    let cancel = CancellationToken::new();
    let signals = service::setup_signal_handler(cancel.clone())?;

    let (events_tx, events_rx) = mpsc::channel(config.service.event_queue);
    let link = LinkState::default();
    let reading_source = source::from_cli(&config, &cli);
    let source_label = reading_source.describe();
    let source_task = source::spawn(reading_source, events_tx, link.clone(), cancel.clone());

    let outcome = match cli.mode {
        RunMode::Interactive => {
            let tick = Duration::from_millis(config.service.tick_ms);
            let ui_cancel = cancel.clone();
            tokio::task::spawn_blocking(move || {
                let app = App::new(TerminalSurface::new(palette), link, source_label);
                ui::run(app, events_rx, ui_cancel, tick)
            })
            .await
            .context("UI thread panicked")?
        }
        RunMode::Daemon => MeterService::new(events_rx, cancel.clone()).run_daemon().await,
    };

    cancel.cancel();
    signals.abort();

    let source_outcome = source_task.await.context("source task panicked")?;
    outcome?;
    source_outcome?;

    tracing::info!("noise-meter stopped");
    Ok(())
}
