//! Dependency weighting
//!
//! The weight of an entry is the number of distinct entries reachable by
//! following dependency links. Traversal uses an explicit worklist and a
//! single visited set shared by all branches, so shared subgraphs are
//! counted once and cycles end the walk instead of looping.

use std::collections::HashSet;

use super::entry::{Entry, EntryIdx};

/// Read-only weight queries over an entry arena
#[derive(Debug, Clone, Copy)]
pub struct Weigher<'a> {
    entries: &'a [Entry],
}

impl<'a> Weigher<'a> {
    pub fn new(entries: &'a [Entry]) -> Self {
        Self { entries }
    }

    fn dependencies(&self, idx: EntryIdx) -> &'a [EntryIdx] {
        self.entries
            .get(idx.0)
            .map(|e| e.dependencies.as_slice())
            .unwrap_or_default()
    }

    /// Returns every entry reachable from `start`, in depth-first order
    ///
    /// `start` itself is included only when a cycle leads back to it.
    pub fn reachable(&self, start: EntryIdx) -> Vec<EntryIdx> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut pending: Vec<EntryIdx> = self.dependencies(start).iter().rev().copied().collect();

        while let Some(idx) = pending.pop() {
            if idx.0 >= self.entries.len() || !visited.insert(idx) {
                continue;
            }
            order.push(idx);
            pending.extend(self.dependencies(idx).iter().rev());
        }

        order
    }

    /// Returns the dependency weight of an entry
    pub fn weight(&self, idx: EntryIdx) -> usize {
        self.reachable(idx).len()
    }

    /// Stable sort by ascending weight
    ///
    /// Weights are recomputed on each comparison.
    pub fn sort_section(&self, section: &mut [EntryIdx]) {
        section.sort_by_key(|idx| self.weight(*idx));
    }
}
