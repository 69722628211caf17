//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML. Every field has a
//! sensible default so the game runs without a config file.

use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// UI appearance and refresh settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_max_log_entries")]
    pub max_log_entries: usize,
    #[serde(default = "default_true")]
    pub show_event_log: bool,
    /// Redraw rate while cards are moving.
    #[serde(default = "default_fps")]
    pub fps: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            max_log_entries: default_max_log_entries(),
            show_event_log: true,
            fps: default_fps(),
        }
    }
}

impl UiConfig {
    /// Interval between redraw ticks; fps is clamped to 1..=120.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.fps.clamp(1, 120)))
    }
}

/// Animation pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Multiplier applied to every duration and delay. 2.0 plays at half
    /// speed.
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
        }
    }
}

const MIN_TIME_SCALE: f64 = 0.01;
const MAX_TIME_SCALE: f64 = 100.0;

impl AnimationConfig {
    /// The configured scale clamped to `0.01..=100`, or 1.0 if it is not a
    /// positive finite number.
    pub fn effective_time_scale(&self) -> f64 {
        if self.time_scale.is_finite() && self.time_scale > 0.0 {
            self.time_scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE)
        } else {
            default_time_scale()
        }
    }
}

/// Diagnostic log file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_dir: default_log_dir(),
            level: default_level(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_max_log_entries() -> usize {
    200
}
fn default_fps() -> u32 {
    30
}
fn default_time_scale() -> f64 {
    1.0
}
fn default_log_dir() -> String {
    "~/.local/share/cardfan/logs".to_string()
}
fn default_level() -> String {
    "info".to_string()
}
