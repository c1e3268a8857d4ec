use crate::config::types::{AggregatorConfig, Config, HttpConfig, SelectorConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// Selector syntax is checked separately, when the extractor compiles them.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_selector_config(&config.selectors)?;
    validate_http_config(&config.http)?;
    validate_aggregator_config(&config.aggregator)?;
    Ok(())
}

/// Validates the site section
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            config.base_url
        )));
    }

    if !config.directory_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "directory-path must start with '/', got '{}'",
            config.directory_path
        )));
    }

    if config.listing_sigil.is_empty() {
        return Err(ConfigError::Validation(
            "listing-sigil cannot be empty".to_string(),
        ));
    }

    if config.page_token.is_empty() {
        return Err(ConfigError::Validation(
            "page-token cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates that no selector is blank
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    let selectors = [
        ("category-container", &config.category_container),
        ("category-link", &config.category_link),
        ("item", &config.item),
        ("title", &config.title),
        ("link", &config.link),
        ("rating", &config.rating),
    ];

    for (name, selector) in selectors {
        if selector.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "selector '{}' cannot be empty",
                name
            )));
        }
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    for name in config.headers.keys() {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ConfigError::Validation(format!(
                "Invalid header name '{}'",
                name
            )));
        }
    }

    Ok(())
}

/// Validates aggregator configuration
fn validate_aggregator_config(config: &AggregatorConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.max_retries > 3 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be at most 3, got {}",
            config.max_retries
        )));
    }

    Ok(())
}
