//! CSV output handler
//!
//! Rows are appended to the destination file, which is created on first use and
//! never truncated. Rows vary in width: eight fixed columns followed by one column
//! per mirror link.

use crate::catalog::Article;
use crate::output::traits::{OutputHandler, OutputResult};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Appends file rows to a CSV file
#[derive(Debug)]
pub struct CsvOutput {
    path: PathBuf,
    // Keeps the rows of one batch together when batches overlap
    write_lock: Mutex<()>,
}

impl CsvOutput {
    /// Creates a handler for the given destination; the file is not touched yet
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the destination path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputHandler for CsvOutput {
    fn write_articles(&self, articles: &[Article]) -> OutputResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);

        let mut rows = 0;
        for article in articles {
            for record in article.records() {
                writer.write_record(&record)?;
                rows += 1;
            }
        }
        writer.flush()?;

        tracing::debug!("Appended {} rows to {}", rows, self.path.display());
        Ok(())
    }
}
