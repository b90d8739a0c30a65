// In crates/strategies/src/registry.rs

use crate::trend_scorer::TrendScorer;
use crate::Result;
use core_types::Symbol;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// Owns one `TrendScorer` per symbol seen so far.
///
/// Entries are created on first sight and live until `remove` is called.
/// Iteration is in symbol order.
#[derive(Debug, Default)]
pub struct ScorerRegistry {
    scorers: BTreeMap<Symbol, TrendScorer>,
}

impl ScorerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scorer for `symbol`, building it with `create` if it is new.
    pub fn get_or_insert_with<F>(&mut self, symbol: &Symbol, create: F) -> Result<&mut TrendScorer>
    where
        F: FnOnce(Symbol) -> Result<TrendScorer>,
    {
        match self.scorers.entry(symbol.clone()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let scorer = create(symbol.clone())?;
                Ok(entry.insert(scorer))
            }
        }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&TrendScorer> {
        self.scorers.get(symbol)
    }

    /// Drops a symbol for good, e.g. after a delisting.
    pub fn remove(&mut self, symbol: &Symbol) -> Option<TrendScorer> {
        self.scorers.remove(symbol)
    }

    pub fn len(&self) -> usize {
        self.scorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scorers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrendScorer> {
        self.scorers.values()
    }
}

/// Keeps the up-trending scorers, orders them by scale (highest first) and
/// returns at most `count` of them.
///
/// The sort is stable, so equal scales keep their input order.
pub fn rank_uptrending<'a, I>(scorers: I, count: usize) -> Vec<&'a TrendScorer>
where
    I: IntoIterator<Item = &'a TrendScorer>,
{
    let mut ranked: Vec<&TrendScorer> = scorers.into_iter().filter(|s| s.is_uptrend()).collect();
    ranked.sort_by(|a, b| b.scale().total_cmp(&a.scale()));
    ranked.truncate(count);
    ranked
}
