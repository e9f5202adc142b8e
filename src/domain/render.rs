//! Document serializer
//!
//! Renders a stack back into the text format read by [`super::parse`].
//! Sections come out in insertion order and entries in their current
//! (possibly sorted) section order.

use std::fmt::{self, Write};

use super::entry::Entry;
use super::parse::{DEPENDENCY_MARKER, ENTRY_MARKER, SECTION_MARKER};
use super::stack::Stack;

fn write_entry(f: &mut impl Write, stack: &Stack, entry: &Entry) -> fmt::Result {
    write!(f, "{} {} [{}]\n\n", ENTRY_MARKER, entry.title, entry.id)?;
    write!(f, "{}\n\n", entry.description)?;

    if entry.has_dependencies() {
        f.write_str(DEPENDENCY_MARKER)?;
        for dep in entry.dependencies() {
            if let Some(target) = stack.get(*dep) {
                write!(f, " [{}]", target.id)?;
            }
        }
        f.write_str("\n\n")?;
    }

    Ok(())
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, list) in self.sections() {
            write!(f, "{} {}\n\n", SECTION_MARKER, name)?;
            for entry in list.iter().filter_map(|idx| self.get(*idx)) {
                write_entry(f, self, entry)?;
            }
        }
        Ok(())
    }
}

/// Renders a stack as document text
pub fn render(stack: &Stack) -> String {
    stack.to_string()
}
