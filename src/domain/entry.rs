//! Entry domain model
//!
//! An entry is a single task in the document. Entries live in the
//! [`Stack`](super::Stack) arena and refer to each other through
//! [`EntryIdx`] handles, so dependency cycles never form ownership cycles.

/// Handle to an entry inside its stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryIdx(pub(crate) usize);

impl EntryIdx {
    /// Position of the entry in document order
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Display title
    pub title: String,

    /// Identifier used by `Dependent On:` references
    pub id: String,

    /// Free text between the header and the next marker
    pub description: String,

    /// Name of the owning section
    pub section: String,

    /// Reserved; not read from or written to the document
    pub tags: Vec<String>,

    /// Entries this one depends on (non-owning)
    pub dependencies: Vec<EntryIdx>,
}

impl Entry {
    /// Creates an entry with the given title and id
    pub fn new(title: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    /// Sets the owning section
    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the direct dependencies
    pub fn dependencies(&self) -> &[EntryIdx] {
        &self.dependencies
    }

    /// Returns true if the entry depends on anything
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// Adds a dependency unless already present
    pub fn add_dependency(&mut self, target: EntryIdx) -> bool {
        if self.dependencies.contains(&target) {
            false
        } else {
            self.dependencies.push(target);
            true
        }
    }
}
