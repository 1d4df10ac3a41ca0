//! Append-only import log.
//!
//! One line per outbound response or row failure, in the shape
//! `YYYY-MM-DD HH:MM:SS LEVEL message`. This file is a durable record of what
//! the platform answered for each row and is kept separate from the
//! process's diagnostic logging.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

/// File name within the log directory.
const LOG_FILE_NAME: &str = "FodImport.log";

/// Default directory, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "log";

#[derive(Debug)]
pub struct ImportLog {
    file: File,
    path: PathBuf,
}

impl ImportLog {
    /// Open the import log in `dir`, creating the directory and file as
    /// needed. Existing content is never truncated.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;

        let path = dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&mut self, message: &str) -> Result<()> {
        self.write("INFO", message)
    }

    pub fn error(&mut self, message: &str) -> Result<()> {
        self.write("ERROR", message)
    }

    fn write(&mut self, level: &str, message: &str) -> Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(self.file, "{timestamp} {level} {message}")
            .with_context(|| format!("failed to write to {}", self.path.display()))
    }
}
