// In crates/runner/src/tracker.rs

use core_types::{SecurityChanges, Symbol};
use std::collections::BTreeSet;

/// Remembers the current universe and diffs each new selection against it.
#[derive(Debug, Default)]
pub struct UniverseTracker {
    current: BTreeSet<Symbol>,
}

impl UniverseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `selection` the current universe and returns what changed.
    ///
    /// `added` follows the selection's ranking; `removed` is in symbol order.
    pub fn apply(&mut self, selection: &[Symbol]) -> SecurityChanges {
        let next: BTreeSet<Symbol> = selection.iter().cloned().collect();

        let added = selection
            .iter()
            .filter(|s| !self.current.contains(*s))
            .cloned()
            .collect();
        let removed = self.current.difference(&next).cloned().collect();

        self.current = next;
        SecurityChanges { added, removed }
    }

    pub fn members(&self) -> impl Iterator<Item = &Symbol> {
        self.current.iter()
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(names: &[&str]) -> Vec<Symbol> {
        names.iter().map(|n| Symbol::from(*n)).collect()
    }

    #[test]
    fn first_selection_adds_everything() {
        let mut tracker = UniverseTracker::new();
        let changes = tracker.apply(&syms(&["B", "A"]));
        assert_eq!(changes.added, syms(&["B", "A"]));
        assert!(changes.removed.is_empty());
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn diffs_against_previous_universe() {
        let mut tracker = UniverseTracker::new();
        tracker.apply(&syms(&["A", "B", "C"]));
        let changes = tracker.apply(&syms(&["D", "B"]));
        assert_eq!(changes.added, syms(&["D"]));
        assert_eq!(changes.removed, syms(&["A", "C"]));
        assert_eq!(tracker.members().cloned().collect::<Vec<_>>(), syms(&["B", "D"]));
    }

    #[test]
    fn reordering_is_not_a_change() {
        let mut tracker = UniverseTracker::new();
        tracker.apply(&syms(&["A", "B"]));
        assert!(tracker.apply(&syms(&["B", "A"])).is_empty());
        let changes = tracker.apply(&[]);
        assert_eq!(changes.removed, syms(&["A", "B"]));
        assert!(tracker.is_empty());
    }
}
