//! Command-line interface argument parsing.
//!
//! This module defines the CLI structure and parsing logic using gumdrop,
//! supporting different run modes and configuration options.

use gumdrop::Options;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default configuration file, optional when not named explicitly
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Run mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Interactive terminal UI mode (default)
    #[default]
    Interactive,
    /// Background daemon mode (no UI, logs only)
    Daemon,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "interactive" => Ok(RunMode::Interactive),
            "daemon" => Ok(RunMode::Daemon),
            other => Err(format!("unknown run mode `{}`", other)),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Interactive => write!(f, "interactive"),
            RunMode::Daemon => write!(f, "daemon"),
        }
    }
}

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert LogLevel to an EnvFilter directive
    pub fn to_filter_string(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level `{}`", other)),
        }
    }
}

/// noise-meter: live sound-level meter fed over MQTT
#[derive(Debug, Options)]
pub struct Cli {
    #[options(help = "print help message")]
    pub help: bool,

    #[options(short = "V", help = "print version")]
    pub version: bool,

    #[options(meta = "MODE", help = "run mode: interactive or daemon")]
    pub mode: RunMode,

    #[options(meta = "PATH", help = "path to configuration file (default: config.toml)")]
    pub config: Option<PathBuf>,

    #[options(meta = "LEVEL", help = "log level: trace, debug, info, warn, error")]
    pub log_level: Option<LogLevel>,

    #[options(meta = "FILE", help = "replay readings from FILE (`-` for stdin) instead of MQTT")]
    pub replay: Option<PathBuf>,

    #[options(no_short, meta = "HOST", help = "MQTT broker host (overrides config file)")]
    pub mqtt_host: Option<String>,

    #[options(no_short, meta = "PORT", help = "MQTT broker port (overrides config file)")]
    pub mqtt_port: Option<u16>,

    #[options(no_short, meta = "TOPIC", help = "MQTT base topic (overrides config file)")]
    pub topic: Option<String>,

    #[options(no_short, help = "print the effective configuration and exit")]
    pub print_config: bool,
}

impl Cli {
    /// Parse command-line arguments, exiting on error or `--help`
    pub fn from_env() -> Self {
        Self::parse_args_default_or_exit()
    }

    /// Config path and whether it was named explicitly
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG), false),
        }
    }
}
