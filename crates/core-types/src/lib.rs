// In crates/core-types/src/lib.rs

pub mod strategy;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use strategy::StrategyConfig;
pub use types::{AllocationTarget, Sample, SecurityChanges, Symbol};
