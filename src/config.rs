//! User settings, read from `config.toml`.
//!
//! The file is looked up at `$TORCHLIGHT_CONFIG` first and then at
//! `<config dir>/torchlight/config.toml`. Every section is optional; anything
//! left out falls back to the defaults below.
//!
//! ```toml
//! log_level = "info"
//!
//! [gesture]
//! swipe_distance = 120.0
//! swipe_velocity = 100.0
//!
//! [torch]
//! leds_path = "/sys/class/leds"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "TORCHLIGHT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Window title, also the prefix of the rendered status line.
    pub title: String,
    pub gesture: GestureConfig,
    pub torch: TorchConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Settings{
            log_level: "warn".to_string(),
            title: "Flashlight".to_string(),
            gesture: GestureConfig::default(),
            torch: TorchConfig::default(),
        }
    }
}

/// Thresholds for turning raw touches into taps and flings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Vertical travel a swipe must exceed, in pixels.
    pub swipe_distance: f64,
    /// Vertical speed a swipe must exceed, in pixels per second.
    pub swipe_velocity: f64,
    /// Travel below which a press and release is a tap.
    pub touch_slop: f64,
    /// Speed below which a release is not reported as a fling at all.
    pub min_fling_velocity: f64,
    /// Trailing window of samples used to measure release velocity.
    pub velocity_window_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig{
            swipe_distance: 100.0,
            swipe_velocity: 100.0,
            touch_slop: 8.0,
            min_fling_velocity: 50.0,
            velocity_window_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorchConfig {
    /// sysfs LED class directory, only consulted on Linux.
    pub leds_path: PathBuf,
}

impl Default for TorchConfig {
    fn default() -> Self {
        TorchConfig{leds_path: PathBuf::from("/sys/class/leds")}
    }
}

impl Settings {
    /// Loads settings from the default location, returning the defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Settings::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read{path: path.to_path_buf(), source})?;
        let settings = toml::from_str(&raw).map_err(|source| ConfigError::Parse{path: path.to_path_buf(), source})?;
        log::info!("loaded config from {}", path.display());
        Ok(settings)
    }

    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("torchlight").join("config.toml"))
    }

    /// Falls back to `warn` when the configured level is not recognised.
    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.gesture.swipe_distance, 100.0);
        assert_eq!(settings.gesture.swipe_velocity, 100.0);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"debug\"\n\n[gesture]\nswipe_distance = 150.0").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.log_level(), log::Level::Debug);
        assert_eq!(settings.gesture.swipe_distance, 150.0);
        assert_eq!(settings.gesture.swipe_velocity, 100.0);
        assert_eq!(settings.torch, TorchConfig::default());
        assert_eq!(settings.title, "Flashlight");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gesture\nswipe_distance = ").unwrap();

        let error = Settings::load_from(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse{..}));
    }

    #[test]
    fn unknown_log_level_falls_back_to_warn() {
        let settings = Settings{log_level: "loud".to_string(), ..Settings::default()};
        assert_eq!(settings.log_level(), log::Level::Warn);
    }
}
