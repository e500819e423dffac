use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Smallest pre-request delay accepted from a config file (milliseconds)
const MIN_REQUEST_DELAY_MS: u64 = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the site layout
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_url '{}' must use HTTP or HTTPS scheme",
            config.base_url
        )));
    }

    validate_path("search_path", &config.search_path)?;
    validate_path("download_prefix", &config.download_prefix)?;

    if config.sort_order.trim().is_empty() {
        return Err(ConfigError::Validation(
            "sort_order cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates an absolute site path
fn validate_path(field: &str, path: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} must start with '/', got '{}'",
            field, path
        )));
    }
    Ok(())
}

/// Validates crawler pacing
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.request_delay_ms < MIN_REQUEST_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "request_delay_ms must be >= {}ms, got {}ms",
            MIN_REQUEST_DELAY_MS, config.request_delay_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + dots and hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '.')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters, dots and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (field, value) in [
        ("incremental_path", &config.incremental_path),
        ("full_path", &config.full_path),
        ("log_path", &config.log_path),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
        }
    }

    // The two CSV destinations have different semantics and must not collide
    if config.incremental_path == config.full_path {
        return Err(ConfigError::Validation(format!(
            "incremental_path and full_path must differ, both are '{}'",
            config.full_path
        )));
    }

    Ok(())
}
