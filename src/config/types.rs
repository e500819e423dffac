use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Archive-Harvester
///
/// Every section falls back to defaults that target the public WinWorld archive,
/// so an empty file (or no file at all) yields a working configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Layout of the archive site being crawled
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin every extracted link is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the search listing
    #[serde(rename = "search-path")]
    pub search_path: String,

    /// Value of the `sort` query parameter on listing pages
    #[serde(rename = "sort-order")]
    pub sort_order: String,

    /// Path prefix of download pages; stripped from table links to get identifiers
    #[serde(rename = "download-prefix")]
    pub download_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://winworldpc.com".to_string(),
            search_path: "/search".to_string(),
            sort_order: "most-recent".to_string(),
            download_prefix: "/download/".to_string(),
        }
    }
}

/// Crawler pacing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Fixed delay before every request (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,
}

impl CrawlerConfig {
    /// Returns the pre-request delay as a `Duration`
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 3000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `Mozilla/5.0 (compatible; Name/vVersion; +ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "Mozilla/5.0 (compatible; {}/v{}; +{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "IPFS.ScraperBot".to_string(),
            crawler_version: "1.1".to_string(),
            contact_url: "https://github.com/Neo-Desktop/winworldpc-ipfs-scraper".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file receiving one append per scraped page
    #[serde(rename = "incremental-path")]
    pub incremental_path: String,

    /// CSV file receiving the complete dataset at the end of the crawl
    #[serde(rename = "full-path")]
    pub full_path: String,

    /// Log file mirrored alongside stdout
    #[serde(rename = "log-path")]
    pub log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            incremental_path: "results.csv".to_string(),
            full_path: "results_full.csv".to_string(),
            log_path: "output.log".to_string(),
        }
    }
}
