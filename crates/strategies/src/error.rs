// In crates/strategies/src/error.rs

use core_types::Symbol;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Rejected sample for {symbol}: {reason}")]
    InvalidSample { symbol: Symbol, reason: String },

    /// The fast and slow averages summed to zero, so the spread cannot be normalized.
    #[error("Scale is undefined for {symbol} (fast = {fast}, slow = {slow})")]
    DegenerateScale { symbol: Symbol, fast: f64, slow: f64 },

    #[error("Invalid strategy settings: {0}")]
    InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
