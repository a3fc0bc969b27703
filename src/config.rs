//! Configuration management for Rollover TestKit
//!
//! Thresholds, history capacities, report pagination and UI settings, stored
//! in a platform-specific TOML file.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/rollover-testkit/config.toml` |
//! | macOS | `~/Library/Application Support/rollover-testkit/config.toml` |
//! | Windows | `%APPDATA%\rollover-testkit\config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use rollover_testkit::Config;
//!
//! let mut config = Config::load().unwrap_or_default();
//! config.thresholds.rapid_press_window_ms = 80;
//! config.save().expect("Failed to save config");
//! ```

use crate::keyboard::KeyboardLayout;
use crate::mouse::DEFAULT_MOUSE_HISTORY;
use crate::stats::DEFAULT_KEY_HISTORY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Returns the path to the config file, creating its directory if needed.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let app_dir = config_dir.join("rollover-testkit");

    if !app_dir.exists() {
        fs::create_dir_all(&app_dir)?;
    }

    Ok(app_dir.join("config.toml"))
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Gaming check thresholds
    pub thresholds: GamingConfig,
    /// History capacities
    pub history: HistoryConfig,
    /// Report layout
    pub report: ReportConfig,
    /// UI settings
    pub ui: UiConfig,
}

/// Gaming check thresholds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamingConfig {
    /// Two presses closer than this (strictly) count as rapid
    pub rapid_press_window_ms: u64,
    /// Max simultaneous keys for full N-key rollover
    pub full_rollover_min: usize,
    /// Max simultaneous keys for 6-key rollover
    pub six_key_rollover_min: usize,
    /// Rapid presses above this rate "Excellent"
    pub excellent_rapid_presses: u64,
    /// Rapid presses above this rate "Good"
    pub good_rapid_presses: u64,
}

impl Default for GamingConfig {
    fn default() -> Self {
        Self {
            rapid_press_window_ms: 100,
            full_rollover_min: 10,
            six_key_rollover_min: 6,
            excellent_rapid_presses: 50,
            good_rapid_presses: 20,
        }
    }
}

/// History capacities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub key_history_capacity: usize,
    pub mouse_history_capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            key_history_capacity: DEFAULT_KEY_HISTORY,
            mouse_history_capacity: DEFAULT_MOUSE_HISTORY,
        }
    }
}

/// Report layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Body lines per document page, headings included
    pub lines_per_page: usize,
    /// Most pressed keys listed in the text summary
    pub summary_top_keys: usize,
    /// Mouse clicks listed in the text summary
    pub summary_mouse_events: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            lines_per_page: 41,
            summary_top_keys: 8,
            summary_mouse_events: 8,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Refresh rate for UI updates (in Hz)
    pub refresh_rate_hz: u32,
    /// Color theme (dark/light)
    pub theme: Theme,
    /// Physical layout drawn by the keyboard visual
    pub layout: KeyboardLayout,
    /// Draw the numpad block
    pub show_numpad: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: 60,
            theme: Theme::Dark,
            layout: KeyboardLayout::Ansi,
            show_numpad: true,
        }
    }
}

/// Color theme options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get UI refresh interval as Duration
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.ui.refresh_rate_hz.max(1) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_config_path(tag: &str) -> PathBuf {
        env::temp_dir().join(format!(
            "rollover-testkit-test-{}-{}.toml",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn config_default_values() {
        let config = Config::default();
        assert_eq!(config.thresholds.rapid_press_window_ms, 100);
        assert_eq!(config.thresholds.full_rollover_min, 10);
        assert_eq!(config.thresholds.six_key_rollover_min, 6);
        assert_eq!(config.thresholds.excellent_rapid_presses, 50);
        assert_eq!(config.thresholds.good_rapid_presses, 20);
        assert_eq!(config.history.key_history_capacity, 12);
        assert_eq!(config.history.mouse_history_capacity, 10);
        assert_eq!(config.report.lines_per_page, 41);
        assert_eq!(config.report.summary_top_keys, 8);
        assert_eq!(config.ui.refresh_rate_hz, 60);
        assert_eq!(config.ui.theme, Theme::Dark);
        assert_eq!(config.ui.layout, KeyboardLayout::Ansi);
    }

    #[test]
    fn config_refresh_interval() {
        let config = Config::default();
        // 60 Hz = 16666 microseconds per frame
        assert_eq!(config.refresh_interval().as_micros(), 16666);
    }

    #[test]
    fn zero_refresh_rate_does_not_divide_by_zero() {
        let mut config = Config::default();
        config.ui.refresh_rate_hz = 0;
        assert_eq!(config.refresh_interval().as_secs(), 1);
    }

    #[test]
    fn config_save_and_load_roundtrip() {
        let path = temp_config_path("roundtrip");

        let mut config = Config::default();
        config.thresholds.rapid_press_window_ms = 75;
        config.ui.theme = Theme::Light;
        config.ui.layout = KeyboardLayout::Iso;

        config.save_to(&path).expect("Failed to save config");
        let loaded = Config::load_from(&path).expect("Failed to load config");

        assert_eq!(loaded.thresholds.rapid_press_window_ms, 75);
        assert_eq!(loaded.ui.theme, Theme::Light);
        assert_eq!(loaded.ui.layout, KeyboardLayout::Iso);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = Config::load_from(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_garbage_is_parse_error() {
        let path = temp_config_path("garbage");
        fs::write(&path, "[thresholds\nnot toml").expect("write temp file");
        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn config_serializes_sections() {
        let toml_str = toml::to_string_pretty(&Config::default()).expect("Failed to serialize");

        assert!(toml_str.contains("[thresholds]"));
        assert!(toml_str.contains("[history]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("[ui]"));
        assert!(toml_str.contains("rapid_press_window_ms = 100"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let toml_str = r#"
[thresholds]
full_rollover_min = 8

[ui]
theme = "Light"
"#;
        let config: Config = toml::from_str(toml_str).expect("Failed to deserialize");

        assert_eq!(config.thresholds.full_rollover_min, 8);
        assert_eq!(config.thresholds.six_key_rollover_min, 6);
        assert_eq!(config.history.key_history_capacity, 12);
        assert_eq!(config.ui.theme, Theme::Light);
        assert_eq!(config.ui.refresh_rate_hz, 60);
    }

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::NoConfigDir.to_string(),
            "Could not determine config directory"
        );
        let io_err = ConfigError::from(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        assert!(io_err.to_string().contains("IO error"));
    }
}
