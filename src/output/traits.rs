//! Output handler traits and types
//!
//! This module defines the trait interface for persisting scraped articles and
//! the errors those writes can produce.

use crate::catalog::Article;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Background write failed: {0}")]
    Task(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// A handler receives batches of finished articles and persists one row per file.
/// Handlers are shared with background tasks, so implementations must be
/// thread-safe. Each call is expected to open, append to, and close its
/// destination independently.
pub trait OutputHandler: Send + Sync {
    /// Persists every file of every article, in article then file order
    ///
    /// # Arguments
    ///
    /// * `articles` - The articles to persist; never mutated by the handler
    fn write_articles(&self, articles: &[Article]) -> OutputResult<()>;
}
