// In crates/allocation/src/fixed_fraction.rs

use crate::types::FixedFractionSettings;
use crate::{Allocator, Error, Result};
use core_types::{AllocationTarget, SecurityChanges, Symbol};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

/// Gives every symbol that joins the universe the same fixed share of the
/// account and closes symbols that leave it.
///
/// Removed symbols are only liquidated if a position is actually open.
#[derive(Debug)]
pub struct FixedFractionAllocator {
    target_fraction: Decimal,
}

impl FixedFractionAllocator {
    /// Creates a new `FixedFractionAllocator` instance from its settings.
    pub fn new(settings: FixedFractionSettings) -> Result<Self> {
        let target_fraction = Decimal::from_f64(settings.target_fraction).ok_or_else(|| {
            Error::InvalidParameters(format!("target_fraction {} is not representable", settings.target_fraction))
        })?;

        if target_fraction <= dec!(0) || target_fraction > dec!(1) {
            return Err(Error::InvalidParameters(format!(
                "target_fraction must be in (0, 1], got {}",
                target_fraction
            )));
        }

        Ok(Self { target_fraction })
    }

    pub fn target_fraction(&self) -> Decimal {
        self.target_fraction
    }
}

impl Allocator for FixedFractionAllocator {
    fn name(&self) -> &'static str {
        "FixedFractionAllocator"
    }

    fn on_securities_changed(
        &self,
        changes: &SecurityChanges,
        invested: &HashSet<Symbol>,
    ) -> Vec<AllocationTarget> {
        let mut targets = Vec::with_capacity(changes.added.len() + changes.removed.len());

        // Free up capital first.
        for symbol in &changes.removed {
            if invested.contains(symbol) {
                targets.push(AllocationTarget::Liquidate { symbol: symbol.clone() });
            } else {
                tracing::debug!(symbol = %symbol, "Removed symbol holds no position. Nothing to liquidate.");
            }
        }

        for symbol in &changes.added {
            targets.push(AllocationTarget::SetHoldings {
                symbol: symbol.clone(),
                fraction: self.target_fraction,
            });
        }

        targets
    }
}
