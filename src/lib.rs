//! Archive-Harvester: a polite software-archive metadata scraper
//!
//! This crate walks the search listing of a public software archive, follows every
//! catalog entry to its detail page and every file to its download page, and
//! flattens the collected metadata into CSV rows.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for Archive-Harvester operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Status code error for {url}: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Pagination control not found on {url}")]
    MissingPagination { url: String },

    #[error("Unable to parse search pagination upper bound: {label:?}")]
    PageCount { label: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid CSS selector {selector:?}: {message}")]
    Selector { selector: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Archive-Harvester operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{Article, File};
pub use config::Config;
pub use crawler::{Coordinator, RateLimitedFetcher};
pub use output::{CrawlSummary, CsvOutput, OutputHandler};
