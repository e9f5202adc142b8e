//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create an empty document |
//! | `sort` | Order sections by dependency weight |
//! | `fmt` | Re-render without reordering |
//! | `list`, `show` | Inspect entries and weights |
//! | `cycles` | Report dependency cycles |
//!
//! All commands support `--format text|json` and `--verbose`, and operate
//! on the nearest `.stack` file unless `--file` is given.
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod edit;
mod query;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
