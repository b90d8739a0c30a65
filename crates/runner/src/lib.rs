pub mod logger;
pub mod tracker;

use std::collections::{BTreeSet, HashSet};

use allocation::Allocator;
use chrono::NaiveDate;
use core_types::{AllocationTarget, Sample, Symbol};
use itertools::Itertools;
use serde::Serialize;
use strategies::UniverseSelection;

use crate::logger::{SelectionLogger, TickRecord};
use crate::tracker::UniverseTracker;

/// Inclusive calendar window a run is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> anyhow::Result<Self> {
        if end < start {
            anyhow::bail!("Run window ends ({}) before it starts ({}).", end, start);
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, sample: &Sample) -> bool {
        let date = sample.time.date_naive();
        date >= self.start && date <= self.end
    }
}

/// Summary of a selection run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub strategy: String,
    pub allocator: String,
    pub ticks: usize,
    pub samples: usize,
    pub samples_outside_window: usize,
    pub symbols_seen: usize,
    pub total_added: usize,
    pub total_removed: usize,
    /// The last selection, in ranking order.
    pub final_universe: Vec<Symbol>,
    pub invested: Vec<Symbol>,
    #[serde(skip)]
    pub records: Vec<TickRecord>,
}

/// Replays recorded samples through a universe selection and an allocator.
///
/// Every distinct timestamp is one evaluation tick. The runner only keeps
/// track of which symbols hold a target so that removals can be told apart
/// from symbols that were never bought; it does no portfolio accounting.
pub struct UniverseRunner {
    /// The universe-selection strategy under test.
    pub strategy: Box<dyn UniverseSelection + Send>,
    /// Turns universe changes into holding targets.
    pub allocator: Box<dyn Allocator + Send + Sync>,
    window: Option<DateWindow>,
    tracker: UniverseTracker,
    invested: HashSet<Symbol>,
    logger: SelectionLogger,
}

impl UniverseRunner {
    pub fn new(
        strategy: Box<dyn UniverseSelection + Send>,
        allocator: Box<dyn Allocator + Send + Sync>,
    ) -> Self {
        Self {
            strategy,
            allocator,
            window: None,
            tracker: UniverseTracker::new(),
            invested: HashSet::new(),
            logger: SelectionLogger::new(),
        }
    }

    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn run(mut self, mut samples: Vec<Sample>) -> anyhow::Result<RunReport> {
        let total_samples = samples.len();
        if let Some(window) = self.window {
            samples.retain(|s| window.contains(s));
        }
        let samples_outside_window = total_samples - samples.len();
        if samples.is_empty() {
            anyhow::bail!(
                "No samples to evaluate ({} loaded, {} outside the run window).",
                total_samples,
                samples_outside_window
            );
        }

        // Stable, so samples sharing a timestamp keep their file order.
        samples.sort_by_key(|s| s.time);
        let symbols_seen = samples.iter().map(|s| &s.symbol).collect::<BTreeSet<_>>().len();

        tracing::info!(
            strategy = self.strategy.name(),
            allocator = self.allocator.name(),
            samples = samples.len(),
            symbols = symbols_seen,
            "Starting universe selection run."
        );

        let mut final_universe = Vec::new();
        for (time, tick) in &samples.iter().chunk_by(|s| s.time) {
            let batch: Vec<Sample> = tick.cloned().collect();

            // --- 1. Ask the strategy for the next universe ---
            let selection = self.strategy.select_universe(&batch);

            // --- 2. Diff against the current universe ---
            let changes = self.tracker.apply(&selection);

            // --- 3. Translate changes into holding targets ---
            let targets = if changes.is_empty() {
                Vec::new()
            } else {
                self.allocator.on_securities_changed(&changes, &self.invested)
            };
            self.apply_targets(&targets);

            self.logger.record_tick(TickRecord {
                time,
                samples: batch.len(),
                selection: selection.clone(),
                changes,
                targets,
            });
            final_universe = selection;
        }

        let mut invested: Vec<Symbol> = self.invested.into_iter().collect();
        invested.sort();

        let report = RunReport {
            strategy: self.strategy.name().to_string(),
            allocator: self.allocator.name().to_string(),
            ticks: self.logger.ticks.len(),
            samples: samples.len(),
            samples_outside_window,
            symbols_seen,
            total_added: self.logger.total_added(),
            total_removed: self.logger.total_removed(),
            final_universe,
            invested,
            records: self.logger.into_ticks(),
        };
        tracing::info!(ticks = report.ticks, universe = report.final_universe.len(), "Run finished.");

        Ok(report)
    }

    fn apply_targets(&mut self, targets: &[AllocationTarget]) {
        for target in targets {
            match target {
                AllocationTarget::Liquidate { symbol } => {
                    tracing::info!(symbol = %symbol, "Liquidate.");
                    self.invested.remove(symbol);
                }
                AllocationTarget::SetHoldings { symbol, fraction } => {
                    tracing::info!(symbol = %symbol, %fraction, "Set holdings.");
                    self.invested.insert(symbol.clone());
                }
            }
        }
    }
}

/// Helper function to print the run report in a readable format.
pub fn print_report(report: &RunReport) {
    println!("\n--- Universe Selection Report ---");
    println!("---------------------------------");
    println!("Strategy:              {}", report.strategy);
    println!("Allocator:             {}", report.allocator);
    println!("Ticks Evaluated:       {}", report.ticks);
    println!("Samples:               {} ({} outside window)", report.samples, report.samples_outside_window);
    println!("Symbols Seen:          {}", report.symbols_seen);
    println!("Additions / Removals:  {} / {}", report.total_added, report.total_removed);
    println!("---------------------------------");
    if report.final_universe.is_empty() {
        println!("Final universe is empty (no symbol in an uptrend).");
    } else {
        println!("Final Universe:");
        for (rank, symbol) in report.final_universe.iter().enumerate() {
            println!("  {:>2}. {}", rank + 1, symbol);
        }
    }
    println!("---------------------------------");
}
