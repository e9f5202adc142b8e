//! Document file storage
//!
//! A stack lives in a single plain-text file. Reads take a shared lock;
//! writes go to a locked temp file that is then renamed over the original.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::{render, IdSource, Parser, Stack};

/// Contents written by `stack init`
pub const TEMPLATE: &str = "# Backlog\n\n";

/// Store for a stack document on disk
pub struct StackFile {
    path: PathBuf,
}

impl StackFile {
    /// Creates a store for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the document exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Path of the temp file used for atomic writes
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("stack"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Reads and parses the document
    pub fn read(&self) -> Result<Stack> {
        self.read_with(&mut Parser::new())
    }

    /// Reads and parses the document with a specific parser
    pub fn read_with<I: IdSource>(&self, parser: &mut Parser<I>) -> Result<Stack> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open document: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on document")?;

        // Lock is released when file is dropped
        parser
            .parse_reader(&file)
            .with_context(|| format!("Failed to read document: {}", self.path.display()))
    }

    /// Renders the stack and replaces the document with it
    pub fn write(&self, stack: &Stack) -> Result<()> {
        self.write_text(&render(stack))
    }

    /// Replaces the document with the given text
    pub fn write_text(&self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on document")?;

            let mut writer = BufWriter::new(&file);
            writer
                .write_all(text.as_bytes())
                .context("Failed to write document")?;
            writer.flush().context("Failed to flush document")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Creates the document from the template if it does not exist
    ///
    /// Returns true if a file was created.
    pub fn init(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.write_text(TEMPLATE)?;
        Ok(true)
    }
}
