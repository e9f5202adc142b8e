//! Document parser
//!
//! The document is read line by line. Three markers are recognized at the
//! start of a line:
//!
//! | Marker | Meaning |
//! |--------|---------|
//! | `## Title [id]` | Opens an entry in the current section |
//! | `# Name` | Opens a section |
//! | `Dependent On: [a] [b]` | Records dependency ids for the open entry |
//!
//! Any other line is description text for the open entry. Dependency ids
//! are resolved in a second pass, once every entry exists, because a
//! reference may point forward or into another section. Ids that match
//! nothing are dropped.

use std::collections::HashMap;
use std::io::Read;

use thiserror::Error;

use super::entry::{Entry, EntryIdx};
use super::id::{IdSource, ProcessIds};
use super::stack::Stack;

/// Prefix of an entry header line
pub const ENTRY_MARKER: &str = "##";

/// Prefix of a section header line
pub const SECTION_MARKER: &str = "#";

/// Prefix of a dependency line
pub const DEPENDENCY_MARKER: &str = "Dependent On:";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Could not read input: {0}")]
    Read(#[from] std::io::Error),
}

/// An entry whose header has been seen but which is not in the stack yet
struct OpenEntry<'t> {
    entry: Entry,
    /// `None` once the description has been closed
    description: Option<Vec<&'t str>>,
    dependency_ids: Vec<String>,
}

impl<'t> OpenEntry<'t> {
    fn new(entry: Entry) -> Self {
        Self {
            entry,
            description: Some(Vec::new()),
            dependency_ids: Vec::new(),
        }
    }

    fn close_description(&mut self) {
        if let Some(lines) = self.description.take() {
            self.entry.description = lines.join("\n").trim().to_string();
        }
    }
}

/// Splits the remainder of an entry header into title and id
fn split_header(rest: &str) -> (&str, &str) {
    match rest.split_once('[') {
        Some((title, id)) => (title.trim(), id.trim().trim_end_matches(']').trim()),
        None => (rest.trim(), ""),
    }
}

/// Extracts ids from the remainder of a dependency line
fn dependency_ids(rest: &str) -> impl Iterator<Item = String> + '_ {
    rest.split(' ')
        .map(|token| token.trim_matches(|c: char| c == '[' || c == ']' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Parser for the task document format
///
/// Generic over the id source so tests can pin generated ids.
pub struct Parser<I = ProcessIds> {
    ids: I,
}

impl Parser<ProcessIds> {
    /// Creates a parser that draws ids from the process-wide source
    pub fn new() -> Self {
        Self { ids: ProcessIds }
    }
}

impl Default for Parser<ProcessIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdSource> Parser<I> {
    /// Creates a parser with a custom id source
    pub fn with_ids(ids: I) -> Self {
        Self { ids }
    }

    /// Reads a whole document from a byte stream and parses it
    ///
    /// Fails only if the stream cannot be read to the end as UTF-8.
    pub fn parse_reader<R: Read>(&mut self, mut reader: R) -> Result<Stack, ParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(self.parse(&text))
    }

    /// Parses a document
    pub fn parse(&mut self, text: &str) -> Stack {
        let mut stack = Stack::new();
        let mut section = String::new();
        let mut open: Option<OpenEntry<'_>> = None;
        let mut pending: Vec<(EntryIdx, Vec<String>)> = Vec::new();

        let mut finish = |stack: &mut Stack, open: Option<OpenEntry<'_>>| {
            if let Some(mut current) = open {
                current.close_description();
                let idx = stack.push(current.entry);
                if !current.dependency_ids.is_empty() {
                    pending.push((idx, current.dependency_ids));
                }
            }
        };

        for line in text.lines() {
            if let Some(rest) = line.strip_prefix(ENTRY_MARKER) {
                finish(&mut stack, open.take());
                let (title, id) = split_header(rest);
                let id = if id.is_empty() {
                    self.ids.next_id()
                } else {
                    id.to_string()
                };
                open = Some(OpenEntry::new(
                    Entry::new(title, id).in_section(section.clone()),
                ));
            } else if let Some(rest) = line.strip_prefix(SECTION_MARKER) {
                finish(&mut stack, open.take());
                section = rest.trim().to_string();
                stack.add_section(section.clone());
            } else if let Some(rest) = line.strip_prefix(DEPENDENCY_MARKER) {
                if let Some(current) = open.as_mut() {
                    current.close_description();
                    current.dependency_ids.extend(dependency_ids(rest));
                }
            } else if let Some(lines) = open.as_mut().and_then(|c| c.description.as_mut()) {
                lines.push(line);
            }
        }
        finish(&mut stack, open.take());

        resolve(&mut stack, pending);
        stack
    }
}

/// Second pass: turns recorded dependency ids into entry handles
fn resolve(stack: &mut Stack, pending: Vec<(EntryIdx, Vec<String>)>) {
    let mut registry: HashMap<String, EntryIdx> = HashMap::new();
    for (idx, entry) in stack.entries() {
        registry.entry(entry.id.clone()).or_insert(idx);
    }

    for (from, ids) in pending {
        for id in ids {
            if let Some(to) = registry.get(&id) {
                stack.add_dependency(from, *to);
            }
        }
    }
}

/// Parses a document using the process-wide id source
pub fn parse(text: &str) -> Stack {
    Parser::new().parse(text)
}

/// Reads and parses a document using the process-wide id source
pub fn parse_reader<R: Read>(reader: R) -> Result<Stack, ParseError> {
    Parser::new().parse_reader(reader)
}
