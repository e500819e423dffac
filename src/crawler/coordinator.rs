//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives the page loop:
//! - Discovering the pagination bound once
//! - Scraping each search listing page in order, one at a time
//! - Handing each page's articles to a background incremental write
//! - Writing the complete dataset once the loop is done

use crate::catalog::Article;
use crate::config::Config;
use crate::crawler::site::SiteScraper;
use crate::output::{log_summary, CrawlSummary, CsvOutput, OutputError, OutputHandler};
use crate::ScraperError;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// Main crawler coordinator structure
pub struct Coordinator {
    scraper: SiteScraper,
    incremental: Arc<dyn OutputHandler>,
    full: Arc<dyn OutputHandler>,
}

impl Coordinator {
    /// Creates a coordinator writing CSV files at the configured paths
    pub fn new(config: &Config) -> Result<Self, ScraperError> {
        Ok(Self::with_outputs(
            SiteScraper::new(config)?,
            Arc::new(CsvOutput::new(&config.output.incremental_path)),
            Arc::new(CsvOutput::new(&config.output.full_path)),
        ))
    }

    /// Creates a coordinator with explicit output handlers
    ///
    /// # Arguments
    ///
    /// * `scraper` - The site scraper
    /// * `incremental` - Receives each page's articles as soon as the page is done
    /// * `full` - Receives the complete dataset after the last page
    pub fn with_outputs(
        scraper: SiteScraper,
        incremental: Arc<dyn OutputHandler>,
        full: Arc<dyn OutputHandler>,
    ) -> Self {
        Self {
            scraper,
            incremental,
            full,
        }
    }

    /// Runs the crawl to completion
    ///
    /// Pages `1..bound` are scraped sequentially (the bound itself is excluded).
    /// After each page, its articles are frozen and written to the incremental
    /// output on a blocking task that the loop does not wait for; those writes may
    /// finish in any order. The full dataset is then written, and only after that
    /// are the outstanding page writes joined.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSummary)` - Crawl completed and the full dataset was written
    /// * `Err(ScraperError)` - The pagination bound or a listing page could not be
    ///   read, or the full dataset could not be written
    pub async fn run(&self) -> Result<CrawlSummary, ScraperError> {
        let started_at = Utc::now();
        let start_time = Instant::now();

        let page_bound = self.scraper.discover_page_count().await?;

        let mut articles: Vec<Article> = Vec::new();
        let mut page_writes = Vec::new();
        let mut pages_scraped = 0;

        for page in 1..page_bound {
            let results: Arc<[Article]> = self.scraper.scrape_search_page(page).await?.into();
            articles.extend(results.iter().cloned());
            pages_scraped += 1;

            tracing::info!("Page {} yielded {} articles", page, results.len());
            page_writes.push(spawn_page_write(Arc::clone(&self.incremental), page, results));
        }

        let articles: Arc<[Article]> = articles.into();
        let full_write = {
            let full = Arc::clone(&self.full);
            let articles = Arc::clone(&articles);
            tokio::task::spawn_blocking(move || full.write_articles(&articles))
        };
        let full_result = match full_write.await {
            Ok(result) => result,
            Err(e) => Err(OutputError::Task(e.to_string())),
        };

        for (page, handle) in page_writes {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("Incremental write for page {} failed: {}", page, e),
                Err(e) => tracing::error!("Incremental write task for page {} failed: {}", page, e),
            }
        }

        full_result?;

        let summary = CrawlSummary::from_articles(
            &articles,
            page_bound,
            pages_scraped,
            started_at,
            start_time.elapsed(),
        );
        log_summary(&summary);

        Ok(summary)
    }
}

/// Starts a background write of one page's frozen articles
fn spawn_page_write(
    output: Arc<dyn OutputHandler>,
    page: u32,
    articles: Arc<[Article]>,
) -> (u32, JoinHandle<Result<(), OutputError>>) {
    let handle = tokio::task::spawn_blocking(move || output.write_articles(&articles));
    (page, handle)
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use archive_harvester::config::Config;
/// use archive_harvester::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(&Config::default()).await?;
/// println!("{} files", summary.files);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlSummary, ScraperError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
