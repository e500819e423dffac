//! Crawl summary statistics
//!
//! Computed from the final article list once the crawl completes, and logged so
//! that partial extractions (articles without files, files without links) are
//! visible at a glance.

use crate::catalog::Article;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Summary of a finished crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the crawl
    pub duration: Duration,

    /// Pagination upper bound reported by the site
    pub page_bound: u32,

    /// Number of search listing pages scraped
    pub pages_scraped: u32,

    /// Number of articles collected
    pub articles: usize,

    /// Articles whose detail page yielded no files
    pub articles_without_files: usize,

    /// Number of files collected
    pub files: usize,

    /// Files for which no storage link was found
    pub files_without_storage_link: usize,

    /// Total mirror links across all files
    pub mirror_links: usize,
}

impl CrawlSummary {
    /// Computes a summary from the collected articles
    pub fn from_articles(
        articles: &[Article],
        page_bound: u32,
        pages_scraped: u32,
        started_at: DateTime<Utc>,
        duration: Duration,
    ) -> Self {
        let files = articles.iter().flat_map(|a| a.files.iter());

        Self {
            started_at,
            duration,
            page_bound,
            pages_scraped,
            articles: articles.len(),
            articles_without_files: articles.iter().filter(|a| a.files.is_empty()).count(),
            files: files.clone().count(),
            files_without_storage_link: files.clone().filter(|f| !f.has_storage_link()).count(),
            mirror_links: files.map(|f| f.mirror_links.len()).sum(),
        }
    }
}

/// Logs a crawl summary
pub fn log_summary(summary: &CrawlSummary) {
    tracing::info!(
        "Pages: {} scraped (upper bound {})",
        summary.pages_scraped,
        summary.page_bound
    );
    tracing::info!(
        "Articles: {} ({} without files)",
        summary.articles,
        summary.articles_without_files
    );
    tracing::info!(
        "Files: {} ({} without storage link), {} mirror links",
        summary.files,
        summary.files_without_storage_link,
        summary.mirror_links
    );
    tracing::info!(
        "Started at {}, total time: {:?}",
        summary.started_at.to_rfc3339(),
        summary.duration
    );
}
