//! # Storage Layer
//!
//! File access and configuration for the stack CLI.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | Plain-text stack document | `.stack` (nearest parent) |
//! | Config | TOML | `~/.config/stack-cli/config.toml` |
//!
//! - [`StackFile`] reads under a shared lock and writes atomically
//!   (locked temp file + rename)
//! - [`Config`] holds user settings and the discovered document path

mod config;
mod document;

pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, DEFAULT_FILE_NAME};
pub use document::{StackFile, TEMPLATE};
