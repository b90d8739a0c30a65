// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, RunSettings, Settings};

/// Loads the application settings from the `config` directory of the working directory.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(Path::new("config"))
}

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file in `config_dir`.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings_from(config_dir: &Path) -> Result<Settings> {
    if !config_dir.is_dir() {
        return Err(Error::MissingDirectory(config_dir.display().to_string()));
    }

    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::with_name(&config_dir.join("base").to_string_lossy()))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&config_dir.join(&environment).to_string_lossy()).required(false))
        // 3. Load settings from environment variables (e.g., `APP__ALLOCATION__TARGET_FRACTION=0.2`).
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").prefix_separator("__").separator("__").try_parsing(true))
        .set_default("app.environment", environment)?
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BASE: &str = r#"
[app]
log_level = "debug"

[run]
start_date = "2010-01-01"
end_date = "2015-01-01"

[universe]
name = "ema_cross"

[universe.params]
fast_period = 100
slow_period = 300
tolerance = 1.01
coarse_count = 10

[allocation]
target_fraction = 0.1
"#;

    #[test]
    fn loads_base_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();

        let settings = load_settings_from(dir.path()).unwrap();

        assert_eq!(settings.app.log_level, "debug");
        assert_eq!(settings.universe.name, "ema_cross");
        assert_eq!(settings.universe.params.get("slow_period").and_then(|v| v.as_integer()), Some(300));
        assert_eq!(settings.run.start_date, chrono::NaiveDate::from_ymd_opt(2010, 1, 1));
        assert_eq!(settings.allocation.target_fraction, 0.1);
    }

    #[test]
    fn environment_file_overrides_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), BASE).unwrap();
        // No APP_ENVIRONMENT is set in tests, so the development overlay applies.
        fs::write(dir.path().join("development.toml"), "[allocation]\ntarget_fraction = 0.2\n").unwrap();

        let settings = load_settings_from(dir.path()).unwrap();

        assert_eq!(settings.allocation.target_fraction, 0.2);
        assert_eq!(settings.app.environment, "development");
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings_from(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::MissingDirectory(_)));
    }

    #[test]
    fn missing_universe_section_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.toml"), "[app]\nlog_level = \"info\"\n").unwrap();
        assert!(matches!(load_settings_from(dir.path()), Err(Error::LoadError(_))));
    }
}
