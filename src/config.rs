//! Configuration types for real-discount

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Reference-price engine configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// A price drop older than this many days no longer counts as a sale action
    #[serde(default = "default_sale_action_days")]
    pub sale_action_interval_days: i64,

    /// Lookback for the most frequent ("common") price
    #[serde(default = "default_common_price_days")]
    pub common_price_interval_days: i64,

    /// Lookback before a sale action for the EU minimum price
    #[serde(default = "default_eu_minimum_days")]
    pub eu_minimum_window_days: i64,

    /// Lower bound of the plausible previous/current ratio (exclusive)
    #[serde(default = "default_outlier_min_ratio")]
    pub outlier_min_ratio: Decimal,

    /// Upper bound of the plausible previous/current ratio (exclusive)
    #[serde(default = "default_outlier_max_ratio")]
    pub outlier_max_ratio: Decimal,
}

fn default_sale_action_days() -> i64 {
    90
}
fn default_common_price_days() -> i64 {
    90
}
fn default_eu_minimum_days() -> i64 {
    30
}
fn default_outlier_min_ratio() -> Decimal {
    Decimal::new(5, 3) // 0.005
}
fn default_outlier_max_ratio() -> Decimal {
    Decimal::new(200, 0)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sale_action_interval_days: default_sale_action_days(),
            common_price_interval_days: default_common_price_days(),
            eu_minimum_window_days: default_eu_minimum_days(),
            outlier_min_ratio: default_outlier_min_ratio(),
            outlier_max_ratio: default_outlier_max_ratio(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The bundled `config.toml.example`
    pub fn example() -> anyhow::Result<Self> {
        Ok(toml::from_str(include_str!("../config.toml.example"))?)
    }
}
