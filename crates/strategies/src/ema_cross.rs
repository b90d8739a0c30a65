// In crates/strategies/src/ema_cross.rs

use crate::registry::{rank_uptrending, ScorerRegistry};
use crate::trend_scorer::TrendScorer;
use crate::types::EmaCrossSettings;
use crate::{Result, UniverseSelection};
use core_types::{Sample, Symbol};

/// Universe selection that keeps the securities whose fast EMA sits furthest
/// above their slow EMA.
#[derive(Debug)]
pub struct EmaCrossUniverse {
    /// The configuration for this strategy instance.
    settings: EmaCrossSettings,
    /// One trend scorer per symbol observed so far.
    registry: ScorerRegistry,
}

impl EmaCrossUniverse {
    /// Creates a new `EmaCrossUniverse` from its settings.
    pub fn new(settings: EmaCrossSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            registry: ScorerRegistry::new(),
        })
    }

    pub fn settings(&self) -> &EmaCrossSettings {
        &self.settings
    }

    /// Routes one sample to its scorer, creating the scorer on first sight.
    pub fn observe(&mut self, sample: &Sample) -> Result<()> {
        let settings = &self.settings;
        let scorer = self
            .registry
            .get_or_insert_with(&sample.symbol, |symbol| TrendScorer::new(symbol, settings))?;
        scorer.update(sample.time, sample.price)
    }

    /// Stops tracking a symbol (e.g. after it was delisted).
    pub fn remove_symbol(&mut self, symbol: &Symbol) -> bool {
        self.registry.remove(symbol).is_some()
    }

    /// All tracked scorers, in symbol order.
    pub fn scores(&self) -> impl Iterator<Item = &TrendScorer> {
        self.registry.iter()
    }

    pub fn tracked_symbols(&self) -> usize {
        self.registry.len()
    }
}

impl UniverseSelection for EmaCrossUniverse {
    fn name(&self) -> &'static str {
        "EmaCrossUniverse"
    }

    fn select_universe(&mut self, samples: &[Sample]) -> Vec<Symbol> {
        // 1. Update every scorer with the latest prices. A bad sample only costs its own update.
        for sample in samples {
            if let Err(e) = self.observe(sample) {
                tracing::warn!(symbol = %sample.symbol, error = %e, "Skipping sample.");
            }
        }

        // 2. Keep the up-trending symbols with the widest spread.
        let ranked = rank_uptrending(self.registry.iter(), self.settings.coarse_count);
        for scorer in &ranked {
            tracing::info!(symbol = %scorer.symbol(), scale = scorer.scale(), "Selected symbol.");
        }

        ranked.into_iter().map(|s| s.symbol().clone()).collect()
    }
}
