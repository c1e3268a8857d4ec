//! Document fetcher
//!
//! This module performs single page retrievals:
//! - Building the shared HTTP client with the configured headers
//! - Classifying failures into timeout, network, and status errors
//!
//! Retries are not done here; the aggregator owns the retry policy.

use crate::config::HttpConfig;
use crate::{ConfigError, FetchError, HarvestError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;

/// Retrieves the raw markup of a URL
///
/// Implementations must be safe to call from many tasks at once.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Performs one retrieval of `url`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The response body of a 2xx response
    /// * `Err(FetchError)` - Timeout, transport failure, or non-2xx status
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client with the configured headers and timeouts
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(HarvestError)` - A configured header is malformed or the client failed to build
///
/// # Example
///
/// ```no_run
/// use listing_harvester::config::HttpConfig;
/// use listing_harvester::harvester::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, HarvestError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ConfigError::Validation(format!("Invalid header name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            ConfigError::Validation(format!("Invalid value for header '{}': {}", name, e))
        })?;
        headers.insert(header_name, header_value);
    }

    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetcher backed by a pooled `reqwest` client
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher from the HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("{} answered with HTTP {}", url, status.as_u16());
            return Err(FetchError::Status {
                code: status.as_u16(),
            });
        }

        response.text().await.map_err(classify_error)
    }
}

/// Maps a transport error onto the fetch failure kinds
fn classify_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_connect() {
        FetchError::Network {
            message: format!("Connection failed: {}", error),
        }
    } else {
        FetchError::Network {
            message: error.to_string(),
        }
    }
}
