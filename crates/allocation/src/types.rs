// In crates/allocation/src/types.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FixedFractionSettings {
    /// Share of total account value given to each newly added symbol (0.1 = 10%).
    #[serde(default = "default_target_fraction")]
    pub target_fraction: f64,
}

impl Default for FixedFractionSettings {
    fn default() -> Self {
        Self { target_fraction: default_target_fraction() }
    }
}

fn default_target_fraction() -> f64 {
    0.1
}
