// In crates/runner/src/logger.rs

use chrono::{DateTime, Utc};
use core_types::{AllocationTarget, SecurityChanges, Symbol};
use serde::Serialize;

/// What happened on one evaluation tick.
#[derive(Debug, Clone, Serialize)]
pub struct TickRecord {
    pub time: DateTime<Utc>,
    pub samples: usize,
    pub selection: Vec<Symbol>,
    pub changes: SecurityChanges,
    pub targets: Vec<AllocationTarget>,
}

/// A logger responsible for recording selections and allocation targets during a run.
#[derive(Debug, Default)]
pub struct SelectionLogger {
    pub ticks: Vec<TickRecord>,
}

impl SelectionLogger {
    /// Creates a new, empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tick(&mut self, record: TickRecord) {
        if !record.changes.is_empty() {
            tracing::info!(
                time = %record.time,
                added = record.changes.added.len(),
                removed = record.changes.removed.len(),
                targets = record.targets.len(),
                "Universe changed."
            );
        }
        self.ticks.push(record);
    }

    pub fn total_added(&self) -> usize {
        self.ticks.iter().map(|t| t.changes.added.len()).sum()
    }

    pub fn total_removed(&self) -> usize {
        self.ticks.iter().map(|t| t.changes.removed.len()).sum()
    }

    pub fn into_ticks(self) -> Vec<TickRecord> {
        self.ticks
    }
}
