//! Page-tier scrapers for the archive site
//!
//! [`SiteScraper`] walks the three extraction tiers:
//! - Search listing pages, whose failures are fatal to the crawl
//! - Article detail pages, whose failures leave the article without files
//! - File download pages, whose failures leave the file without links
//!
//! All fetching goes through the shared [`RateLimitedFetcher`], so every tier is
//! paced identically.

use crate::catalog::{Article, File};
use crate::config::{Config, SiteConfig};
use crate::crawler::fetcher::RateLimitedFetcher;
use crate::crawler::parser::PageParser;
use crate::ScraperError;
use url::Url;

/// Scraper for every page type of the archive site
pub struct SiteScraper {
    fetcher: RateLimitedFetcher,
    parser: PageParser,
    site: SiteConfig,
    base_url: Url,
}

impl SiteScraper {
    /// Creates a scraper with a fetcher built from the configuration
    pub fn new(config: &Config) -> Result<Self, ScraperError> {
        let fetcher = RateLimitedFetcher::new(config)?;
        Self::with_fetcher(&config.site, fetcher)
    }

    /// Creates a scraper around an existing fetcher
    pub fn with_fetcher(site: &SiteConfig, fetcher: RateLimitedFetcher) -> Result<Self, ScraperError> {
        Ok(Self {
            fetcher,
            parser: PageParser::new(site.download_prefix.clone())?,
            base_url: Url::parse(&site.base_url)?,
            site: site.clone(),
        })
    }

    /// Builds the search listing URL, with sort order and page number when a page is given
    pub fn search_url(&self, page: Option<u32>) -> Result<Url, ScraperError> {
        let mut url = self.base_url.join(&self.site.search_path)?;
        if let Some(page) = page {
            url.query_pairs_mut()
                .append_pair("sort", &self.site.sort_order)
                .append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    /// Builds the download page URL for a file identifier
    pub fn download_url(&self, identifier: &str) -> Result<Url, ScraperError> {
        Ok(self
            .base_url
            .join(&format!("{}{}", self.site.download_prefix, identifier))?)
    }

    /// Discovers the number of search result pages
    ///
    /// Any failure here is fatal: without the bound the crawl cannot be enumerated.
    pub async fn discover_page_count(&self) -> Result<u32, ScraperError> {
        let url = self.search_url(None)?;
        tracing::info!("Fetching search pagination upper bound");

        let body = self.fetcher.fetch(&url).await?;
        let count = self.parser.parse_page_count(&body, &url)?;

        tracing::info!("====== Found {} total pages ======", count);
        Ok(count)
    }

    /// Scrapes one search listing page and every article it links to
    ///
    /// Fetch failures are returned to the caller. A version link without a target
    /// is skipped with a warning and the rest of the page is still processed.
    pub async fn scrape_search_page(&self, page: u32) -> Result<Vec<Article>, ScraperError> {
        tracing::info!(
            "=============================== PAGE {:2} ===============================",
            page
        );

        let url = self.search_url(Some(page))?;
        let body = self.fetcher.fetch(&url).await?;
        let entries = self.parser.parse_search_page(&body);

        let mut articles = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(link) = entry.link else {
                tracing::warn!(
                    "Version link {:?} of {:?} does not have a href, skipping",
                    entry.version,
                    entry.title
                );
                continue;
            };

            let stub = Article::stub(entry.title, entry.version, link);
            articles.push(self.scrape_article(stub).await);
        }

        Ok(articles)
    }

    /// Fills an article with the files listed on its detail page
    ///
    /// On any failure the article is returned unchanged.
    pub async fn scrape_article(&self, mut article: Article) -> Article {
        let url = match self.base_url.join(&article.link) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Invalid detail link {:?}: {}", article.link, e);
                return article;
            }
        };

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to fetch detail page for {}: {}", article.title, e);
                return article;
            }
        };

        for file in self.parser.parse_article_page(&body) {
            let file = self.scrape_download(file).await;
            article.files.push(file);
        }

        tracing::debug!(
            "{} {}: {} files",
            article.title,
            article.version,
            article.files.len()
        );
        article
    }

    /// Adds the storage link and mirror links from a file's download page
    ///
    /// On any failure the file is returned unchanged.
    pub async fn scrape_download(&self, mut file: File) -> File {
        if file.identifier.is_empty() {
            tracing::warn!("File {:?} has no download identifier, skipping links", file.name);
            return file;
        }

        let url = match self.download_url(&file.identifier) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Invalid download identifier {:?}: {}", file.identifier, e);
                return file;
            }
        };

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to fetch download page for {}: {}", file.name, e);
                return file;
            }
        };

        let links = self.parser.parse_download_page(&body);
        if let Some(storage_link) = links.storage_link {
            file.storage_link = storage_link;
        }
        file.mirror_links.extend(links.mirror_links);

        file
    }
}
