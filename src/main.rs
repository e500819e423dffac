//! Archive-Harvester main entry point
//!
//! This is the command-line interface for the Archive-Harvester scraper.

use anyhow::Context;
use archive_harvester::config::{load_config_with_hash, Config};
use archive_harvester::crawler::crawl;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Archive-Harvester: a polite software-archive metadata scraper
///
/// Archive-Harvester walks every search listing page of the archive, follows each
/// catalog entry to its files, and records names, checksums, storage links and
/// mirrors as CSV rows.
#[derive(Parser, Debug)]
#[command(name = "archive-harvester")]
#[command(version)]
#[command(about = "A polite software-archive metadata scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    // Must stay alive until exit so buffered log lines reach the file
    let _log_guard = setup_logging(cli.verbose, cli.quiet, Path::new(&config.output.log_path))?;

    match (&cli.config, &config_hash) {
        (Some(path), Some(hash)) => tracing::info!(
            "Configuration loaded from {} (hash: {})",
            path.display(),
            hash
        ),
        _ => tracing::info!("Using built-in configuration"),
    }

    handle_crawl(&config).await
}

/// Sets up the two log sinks (stdout and the log file) based on verbosity level
fn setup_logging(verbose: u8, quiet: bool, log_path: &Path) -> anyhow::Result<WorkerGuard> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("archive_harvester=info,warn"),
            1 => EnvFilter::new("archive_harvester=debug,info"),
            2 => EnvFilter::new("archive_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let directory = log_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Log path {} has no file name", log_path.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let console_layer = fmt::layer().with_target(false);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Archive-Harvester Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Search path: {}", config.site.search_path);
    println!("  Sort order: {}", config.site.sort_order);
    println!("  Download prefix: {}", config.site.download_prefix);

    println!("\nCrawler:");
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Per-page rows: {}", config.output.incremental_path);
    println!("  Full dataset: {}", config.output.full_path);
    println!("  Log file: {}", config.output.log_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Archive-Harvester started against {}", config.site.base_url);

    match crawl(config).await {
        Ok(summary) => {
            tracing::info!(
                "Archive-Harvester completed: {} files from {} articles",
                summary.files,
                summary.articles
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
