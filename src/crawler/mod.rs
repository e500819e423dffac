//! Crawler module for archive traversal
//!
//! This module contains the core crawling logic, including:
//! - Rate-limited HTTP fetching
//! - Page parsing for every archive page type
//! - Per-tier scraping (listing, article, download)
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod site;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, Clock, RateLimitedFetcher, TokioClock};
pub use parser::{
    ColumnRule, DownloadLinks, Extraction, FileField, ListingEntry, PageParser,
    FILE_TABLE_COLUMNS,
};
pub use site::SiteScraper;

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::ScraperError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and page parser
/// 2. Discover the pagination bound
/// 3. Scrape every listing page, article, and download page
/// 4. Append each page's rows and write the full dataset
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - Crawl completed successfully
/// * `Err(ScraperError)` - Crawl failed fatally
pub async fn crawl(config: &Config) -> Result<CrawlSummary, ScraperError> {
    run_crawl(config).await
}
