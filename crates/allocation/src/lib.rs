// In crates/allocation/src/lib.rs

use core_types::{AllocationTarget, SecurityChanges, Symbol};
use std::collections::HashSet;
pub mod fixed_fraction;

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};

/// The universal interface for reacting to universe changes.
///
/// An `Allocator` turns the symbols that entered and left the universe into
/// holding targets. It never touches a portfolio itself; whoever owns the
/// portfolio decides how to fill the targets.
pub trait Allocator {
    /// The name of the allocation policy.
    fn name(&self) -> &'static str;

    /// Produces the holding targets for one universe change.
    ///
    /// # Arguments
    ///
    /// * `changes`: The symbols added to and removed from the universe.
    /// * `invested`: The symbols that currently hold an open position.
    ///
    /// # Returns
    ///
    /// The targets in the order they should be applied. An empty change
    /// yields no targets.
    fn on_securities_changed(
        &self,
        changes: &SecurityChanges,
        invested: &HashSet<Symbol>,
    ) -> Vec<AllocationTarget>;
}
