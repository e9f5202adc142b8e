//! Stack - a dependency-aware task list in a plain-text document
//!
//! Tasks live in a human-editable file (`.stack` by default), grouped under
//! `#` section headers. Entries declare what they depend on, and each
//! section can be reordered so the least dependent work comes first.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{parse, render, Entry, EntryIdx, ParseError, Parser, Stack};
