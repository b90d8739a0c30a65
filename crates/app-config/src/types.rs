// In crates/app-config/src/types.rs

use allocation::types::FixedFractionSettings;
use chrono::NaiveDate;
use core_types::StrategyConfig;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// The calendar window samples are replayed in.
    #[serde(default)]
    pub run: RunSettings,
    /// Which universe-selection strategy to use and its `params` table.
    pub universe: StrategyConfig,
    #[serde(default)]
    pub allocation: FixedFractionSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunSettings {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn default_log_level() -> String { "info".to_string() }
