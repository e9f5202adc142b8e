//! Stack aggregate
//!
//! The stack owns every entry in one arena and keeps an insertion-ordered
//! map from section name to the entries of that section. Sections hold
//! handles into the arena; reordering a section never moves an entry.

use indexmap::IndexMap;

use super::entry::{Entry, EntryIdx};
use super::weight::Weigher;

/// A parsed task document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    /// All entries, in the order they were added
    entries: Vec<Entry>,

    /// Section name to the ordered entries of that section
    sections: IndexMap<String, Vec<EntryIdx>>,
}

impl Stack {
    /// Creates an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a section, keeping it empty if it is new
    pub fn add_section(&mut self, name: impl Into<String>) {
        self.sections.entry(name.into()).or_default();
    }

    /// Adds an entry at the end of its section
    ///
    /// The section is registered if it does not exist yet.
    pub fn push(&mut self, entry: Entry) -> EntryIdx {
        let idx = EntryIdx(self.entries.len());
        self.sections
            .entry(entry.section.clone())
            .or_default()
            .push(idx);
        self.entries.push(entry);
        idx
    }

    /// Records that `from` depends on `to`
    ///
    /// Returns false if either handle is unknown or the link already exists.
    pub fn add_dependency(&mut self, from: EntryIdx, to: EntryIdx) -> bool {
        if to.0 >= self.entries.len() {
            return false;
        }
        match self.entries.get_mut(from.0) {
            Some(entry) => entry.add_dependency(to),
            None => false,
        }
    }

    /// Returns the entry behind a handle
    pub fn get(&self, idx: EntryIdx) -> Option<&Entry> {
        self.entries.get(idx.0)
    }

    /// Finds the first entry in document order with the given id
    pub fn find(&self, id: &str) -> Option<EntryIdx> {
        self.entries.iter().position(|e| e.id == id).map(EntryIdx)
    }

    /// Iterates all entries in the order they were added
    pub fn entries(&self) -> impl Iterator<Item = (EntryIdx, &Entry)> {
        self.entries.iter().enumerate().map(|(i, e)| (EntryIdx(i), e))
    }

    /// Returns the entry arena
    pub fn arena(&self) -> &[Entry] {
        &self.entries
    }

    /// Iterates sections in insertion order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[EntryIdx])> {
        self.sections
            .iter()
            .map(|(name, list)| (name.as_str(), list.as_slice()))
    }

    /// Returns the entries of one section in their current order
    pub fn section(&self, name: &str) -> Option<&[EntryIdx]> {
        self.sections.get(name).map(Vec::as_slice)
    }

    /// Returns the ids of one section's entries in their current order
    pub fn section_ids(&self, name: &str) -> Vec<&str> {
        self.section(name)
            .unwrap_or_default()
            .iter()
            .filter_map(|idx| self.get(*idx))
            .map(|e| e.id.as_str())
            .collect()
    }

    /// Returns the number of sections
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the stack holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a weigher over this stack's entries
    pub fn weigher(&self) -> Weigher<'_> {
        Weigher::new(&self.entries)
    }

    /// Returns the dependency weight of an entry
    pub fn weight(&self, idx: EntryIdx) -> usize {
        self.weigher().weight(idx)
    }

    /// Orders every section by ascending dependency weight
    ///
    /// Equal weights keep their document order.
    pub fn sort(&mut self) {
        let weigher = Weigher::new(&self.entries);
        for list in self.sections.values_mut() {
            weigher.sort_section(list);
        }
    }
}
