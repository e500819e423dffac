//! Output module for persisting crawl results
//!
//! This module handles:
//! - Flattening articles into CSV rows, appended per page and once in full
//! - Summarizing the finished crawl

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::CsvOutput;
pub use stats::{log_summary, CrawlSummary};
pub use traits::{OutputError, OutputHandler, OutputResult};
