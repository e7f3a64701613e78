//! Application configuration management.
//!
//! This module handles loading, parsing, and validating the application
//! configuration. Values are layered: built-in defaults, then an optional
//! TOML file, then `NOISE_METER__SECTION__KEY` environment variables, then
//! CLI overrides.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment variable overrides
const ENV_PREFIX: &str = "NOISE_METER";

/// Top-level application configuration
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
    pub mqtt: MqttConfig,
    pub replay: ReplayConfig,
    pub theme: ThemeConfig,
}

/// Service runtime configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    /// How long the UI waits for a key press before redrawing
    pub tick_ms: u64,
    /// Capacity of the event channel between source and renderer
    pub event_queue: usize,
    pub auto_reconnect: bool,
    /// 0 means retry forever
    pub max_reconnect_attempts: u32,
    pub reconnect_delay_ms: u64,
    pub max_reconnect_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub colored: bool,
    pub json: bool,
}

/// MQTT broker configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub base_topic: String,
    /// Event name appended to the base topic
    pub event: String,
    pub client_id: String,
    pub keep_alive_secs: u64,
    pub clean_session: bool,
    pub qos: i32,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Replay source configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ReplayConfig {
    pub interval_ms: u64,
    /// Start over at end of input (files only)
    pub repeat: bool,
}

/// Display colors, as `#rrggbb` or a terminal color name
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default, rename_all = "kebab-case")]
pub struct ThemeConfig {
    pub accent_blue: String,
    pub accent_red: String,
    pub accent_yellow: String,
    pub accent_green: String,
    pub glow_red: String,
    pub glow_blue: String,
    pub reference_line: String,
    pub fill_tint: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            event_queue: 256,
            auto_reconnect: true,
            max_reconnect_attempts: 0,
            reconnect_delay_ms: 1000,
            max_reconnect_delay_ms: 60000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            colored: true,
            json: false,
        }
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            base_topic: "noise-meter".to_string(),
            event: "db_update".to_string(),
            client_id: "noise-meter".to_string(),
            keep_alive_secs: 20,
            clean_session: true,
            qos: 0,
            username: None,
            password: None,
        }
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            interval_ms: 50,
            repeat: false,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_blue: "#00bcd4".to_string(),
            accent_red: "#ff4d4d".to_string(),
            accent_yellow: "#ffc107".to_string(),
            accent_green: "#4caf50".to_string(),
            glow_red: "#ff1744".to_string(),
            glow_blue: "#40c4ff".to_string(),
            reference_line: "#2a4768".to_string(),
            fill_tint: "#0a3a42".to_string(),
        }
    }
}

impl MqttConfig {
    /// Topic carrying reading events
    pub fn topic(&self) -> String {
        format!("{}/{}", self.base_topic.trim_end_matches('/'), self.event)
    }
}

impl AppConfig {
    /// Load configuration, layering the file and environment over defaults.
    ///
    /// A missing file is only an error when `required` is set.
    pub fn load<P: AsRef<Path>>(path: P, required: bool) -> Result<Self> {
        let path = path.as_ref();
        if required && !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let builder = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        let settings = theme_env_overrides(builder, std::env::vars())?
            .build()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.service.tick_ms == 0 {
            return Err(invalid("service.tick_ms", "must be greater than 0"));
        }

        if self.service.event_queue == 0 {
            return Err(invalid("service.event_queue", "must be greater than 0"));
        }

        if self.service.reconnect_delay_ms > self.service.max_reconnect_delay_ms {
            return Err(invalid(
                "service.reconnect_delay_ms",
                "cannot exceed service.max_reconnect_delay_ms",
            ));
        }

        if self.mqtt.port == 0 {
            return Err(invalid("mqtt.port", "must be greater than 0"));
        }

        if self.mqtt.qos < 0 || self.mqtt.qos > 2 {
            return Err(invalid("mqtt.qos", "must be 0, 1, or 2"));
        }

        if self.mqtt.base_topic.is_empty() {
            return Err(invalid("mqtt.base_topic", "cannot be empty"));
        }

        if self.mqtt.event.is_empty() || self.mqtt.event.contains(['/', '+', '#']) {
            return Err(invalid("mqtt.event", "must be a single topic level"));
        }

        if self.replay.interval_ms == 0 {
            return Err(invalid("replay.interval_ms", "must be greater than 0"));
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(level) = cli.log_level {
            self.logging.level = level.to_filter_string().to_string();
        }

        if let Some(host) = &cli.mqtt_host {
            self.mqtt.host = host.clone();
        }

        if let Some(port) = cli.mqtt_port {
            self.mqtt.port = port;
        }

        if let Some(topic) = &cli.topic {
            self.mqtt.base_topic = topic.clone();
        }
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }
}

fn invalid(field: &str, message: &str) -> crate::error::AppError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

/// Map `NOISE_METER__THEME__ACCENT_RED` onto `theme.accent-red`.
///
/// Environment names cannot carry the dashes of the `[theme]` keys, so the
/// plain environment source files them under keys serde never matches.
fn theme_env_overrides<I>(
    mut builder: config::ConfigBuilder<config::builder::DefaultState>,
    vars: I,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>>
where
    I: IntoIterator<Item = (String, String)>,
{
    let prefix = format!("{}__THEME__", ENV_PREFIX);
    for (name, value) in vars {
        let Some(key) = name.strip_prefix(&prefix) else {
            continue;
        };
        let key = format!("theme.{}", key.to_lowercase().replace('_', "-"));
        builder = builder
            .set_override(key, value)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
    }
    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    /// Loading reads the process environment; tests touching it run one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.mqtt.host, "localhost");
        assert_eq!(config.mqtt.port, 1883);
        assert_eq!(config.mqtt.topic(), "noise-meter/db_update");
        assert_eq!(config.theme.reference_line, "#2a4768");
        assert_eq!(config.theme.fill_tint, "#0a3a42");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_qos() {
        let mut config = AppConfig::default();
        config.mqtt.qos = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_tick() {
        let mut config = AppConfig::default();
        config.service.tick_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_event_with_wildcard() {
        let mut config = AppConfig::default();
        config.mqtt.event = "db/#".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let _env = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[mqtt]\nhost = \"broker.local\"\nbase_topic = \"lab/meter/\"\n\n[theme]\naccent-red = \"#aa0000\""
        )
        .unwrap();

        let config = AppConfig::load(file.path(), true).unwrap();
        assert_eq!(config.mqtt.host, "broker.local");
        assert_eq!(config.mqtt.port, 1883);
        assert_eq!(config.mqtt.topic(), "lab/meter/db_update");
        assert_eq!(config.theme.accent_red, "#aa0000");
        assert_eq!(config.theme.accent_blue, "#00bcd4");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let _env = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[mqtt]\nqos = 5").unwrap();
        assert!(AppConfig::load(file.path(), true).is_err());
    }

    #[test]
    fn test_missing_file() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(&path, true).is_err());
        assert!(AppConfig::load(&path, false).is_ok());
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let rendered = AppConfig::default().to_toml().unwrap();
        assert!(rendered.contains("accent-blue = \"#00bcd4\""));
        assert!(rendered.contains("[mqtt]"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let _env = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[mqtt]\nport = 1884\n\n[theme]\naccent-red = \"#aa0000\"").unwrap();

        // SAFETY: environment access in this module is serialized by ENV_LOCK
        unsafe {
            std::env::set_var("NOISE_METER__MQTT__PORT", "8883");
            std::env::set_var("NOISE_METER__THEME__ACCENT_RED", "#123456");
            std::env::set_var("NOISE_METER__THEME__FILL_TINT", "#010203");
        }
        let loaded = AppConfig::load(file.path(), true);
        unsafe {
            std::env::remove_var("NOISE_METER__MQTT__PORT");
            std::env::remove_var("NOISE_METER__THEME__ACCENT_RED");
            std::env::remove_var("NOISE_METER__THEME__FILL_TINT");
        }

        let config = loaded.unwrap();
        assert_eq!(config.mqtt.port, 8883);
        assert_eq!(config.theme.accent_red, "#123456");
        assert_eq!(config.theme.fill_tint, "#010203");
        assert_eq!(config.theme.accent_blue, "#00bcd4");
    }

    #[test]
    fn test_theme_env_keys_are_kebab_cased() {
        let vars = vec![
            ("NOISE_METER__THEME__GLOW_BLUE".to_string(), "#0000ff".to_string()),
            ("NOISE_METER__MQTT__HOST".to_string(), "ignored".to_string()),
        ];
        let settings = theme_env_overrides(config::Config::builder(), vars)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(settings.get_string("theme.glow-blue").unwrap(), "#0000ff");
        assert!(settings.get_string("mqtt.host").is_err());
    }
}
