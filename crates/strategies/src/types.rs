// In crates/strategies/src/types.rs

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmaCrossSettings {
    #[serde(default = "default_fast_period")]
    pub fast_period: u32,
    #[serde(default = "default_slow_period")]
    pub slow_period: u32,

    /// The fast average must exceed the slow one by this multiple to count as an uptrend.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// How many symbols the selection returns at most.
    #[serde(default = "default_coarse_count")]
    pub coarse_count: usize,
}

impl Default for EmaCrossSettings {
    fn default() -> Self {
        Self {
            fast_period: default_fast_period(),
            slow_period: default_slow_period(),
            tolerance: default_tolerance(),
            coarse_count: default_coarse_count(),
        }
    }
}

impl EmaCrossSettings {
    pub fn validate(&self) -> Result<()> {
        if self.fast_period < 1 || self.slow_period < 1 {
            return Err(Error::InvalidSettings("EMA periods must be greater than 0".to_string()));
        }
        if self.fast_period >= self.slow_period {
            return Err(Error::InvalidSettings(format!(
                "fast_period ({}) must be shorter than slow_period ({})",
                self.fast_period, self.slow_period
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance < 1.0 {
            return Err(Error::InvalidSettings(format!(
                "tolerance must be a finite multiplier >= 1.0, got {}",
                self.tolerance
            )));
        }
        if self.coarse_count == 0 {
            return Err(Error::InvalidSettings("coarse_count must be greater than 0".to_string()));
        }
        Ok(())
    }
}

fn default_fast_period() -> u32 { 100 }
fn default_slow_period() -> u32 { 300 }
fn default_tolerance() -> f64 { 1.01 }
fn default_coarse_count() -> usize { 10 }
