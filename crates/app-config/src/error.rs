// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration directory not found: {0}")]
    MissingDirectory(String),
}

pub type Result<T> = std::result::Result<T, Error>;
