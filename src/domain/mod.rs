//! Domain models for the task stack
//!
//! Contains the document model, parser, serializer and weighting logic
//! without any file or terminal I/O.

mod id;
mod entry;
mod stack;
mod weight;
mod parse;
mod render;
mod cycles;

pub use id::{IdSource, ProcessIds, SequentialIds, GENERATED_ID_LEN, ID_ALPHABET};
pub use entry::{Entry, EntryIdx};
pub use stack::Stack;
pub use weight::Weigher;
pub use parse::{parse, parse_reader, ParseError, Parser, DEPENDENCY_MARKER, ENTRY_MARKER, SECTION_MARKER};
pub use render::render;
pub use cycles::find_cycles;
