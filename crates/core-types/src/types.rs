// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tradable instrument identifier (e.g., "SPY").
///
/// Ordered so that collections keyed by symbol iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One end-of-period observation for a symbol, as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub symbol: Symbol,
    pub time: DateTime<Utc>,
    /// The adjusted closing price.
    pub price: f64,
}

/// The difference between two consecutive universes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SecurityChanges {
    pub added: Vec<Symbol>,
    pub removed: Vec<Symbol>,
}

impl SecurityChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// A desired change in holdings produced in reaction to a universe change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action")]
pub enum AllocationTarget {
    /// Fully close any open position in the symbol.
    Liquidate { symbol: Symbol },
    /// Hold the symbol at `fraction` of total account value.
    SetHoldings { symbol: Symbol, fraction: Decimal },
}

impl AllocationTarget {
    pub fn symbol(&self) -> &Symbol {
        match self {
            AllocationTarget::Liquidate { symbol } => symbol,
            AllocationTarget::SetHoldings { symbol, .. } => symbol,
        }
    }
}
