// In crates/strategies/src/lib.rs

use core_types::{Sample, Symbol};
pub mod ema;
pub mod ema_cross;
pub mod error;
pub mod factory;
pub mod registry;
pub mod trend_scorer;
pub mod types;

pub use error::{Error, Result};

/// The universal interface for a universe-selection strategy.
///
/// A selector is handed every sample delivered for an evaluation tick and
/// answers with the ranked list of symbols it wants to hold next. It is a
/// stateful entity: indicator history carries over from one tick to the next.
pub trait UniverseSelection {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    fn select_universe(&mut self, samples: &[Sample]) -> Vec<Symbol>;
}
