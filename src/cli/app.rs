//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{edit, query};
use crate::storage::{Config, StackFile};

#[derive(Parser)]
#[command(name = "stack")]
#[command(author, version, about = "Dependency-aware task list in a plain-text file")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Stack document to use (defaults to the nearest .stack file)
    #[arg(long, global = true, env = "STACK_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty stack document
    Init {
        /// Directory to create the document in
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Order every section so the least dependent tasks come first
    Sort {
        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },

    /// Re-render the document without reordering (fills in missing ids)
    Fmt {
        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },

    /// List entries with their dependency weight
    List {
        /// Only show this section
        #[arg(long)]
        section: Option<String>,
    },

    /// Show one entry and everything it depends on
    Show {
        /// Entry ID
        id: String,
    },

    /// Report dependency cycles
    Cycles,
}

/// Resolves the document the command operates on
fn document(cli_file: Option<PathBuf>, config: &Config) -> Result<StackFile> {
    match cli_file {
        Some(path) => Ok(StackFile::new(path)),
        None => Ok(StackFile::new(config.require_document()?)),
    }
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let format = cli
        .format
        .unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format, cli.verbose);

    output.verbose("Stack CLI starting");
    if let Some(path) = &config.document {
        output.verbose(&format!("Discovered document: {}", path.display()));
    }

    match cli.command {
        Commands::Init { path } => {
            let store = match cli.file {
                Some(file) => StackFile::new(file),
                None => StackFile::new(path.join(&config.global.file_name)),
            };
            output.verbose_ctx("init", &format!("Initializing document at: {}", store.path().display()));
            edit::init(&output, &store)?
        }

        Commands::Sort { write } => {
            let store = document(cli.file, &config)?;
            output.verbose_ctx("sort", &format!("Sorting {}, write={}", store.path().display(), write));
            edit::sort(&output, &store, write)?
        }

        Commands::Fmt { write } => {
            let store = document(cli.file, &config)?;
            output.verbose_ctx("fmt", &format!("Formatting {}, write={}", store.path().display(), write));
            edit::fmt(&output, &store, write)?
        }

        Commands::List { section } => {
            let store = document(cli.file, &config)?;
            output.verbose_ctx("list", &format!("Listing entries, section filter: {:?}", section));
            query::list(&output, &store, section.as_deref())?
        }

        Commands::Show { id } => {
            let store = document(cli.file, &config)?;
            query::show(&output, &store, &id)?
        }

        Commands::Cycles => {
            let store = document(cli.file, &config)?;
            query::cycles(&output, &store)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
