//! Listing-Harvester: category discovery and paginated listing retrieval
//!
//! This crate discovers the category directory of a listing website and
//! retrieves paginated item listings (title, rating, detail link) for the
//! selected categories, fetching pages concurrently and tolerating partial
//! network and markup failures.

pub mod config;
pub mod harvester;
pub mod model;
pub mod url;

use thiserror::Error;

/// Main error type for Listing-Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: FetchError },

    #[error("Expected container '{selector}' not found at {url}")]
    StructureNotFound { url: String, selector: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Page count must be at least 1, got {0}")]
    InvalidPageCount(u32),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Failure of a single document retrieval
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, TLS error, broken body, ...
    #[error("Network error: {message}")]
    Network { message: String },

    /// The server answered with a non-2xx status
    #[error("HTTP status {code}")]
    Status { code: u16 },

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,
}

impl FetchError {
    /// Returns true if a repeated attempt could plausibly succeed
    ///
    /// Status errors are answers from the server and are never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout)
    }
}

/// Markup extraction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The structural container the extractor relies on is absent
    #[error("Structural container '{selector}' not found")]
    StructureNotFound { selector: String },
}

/// Result type alias for Listing-Harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use harvester::{filter_by_rating, plan_pages, Harvester};
pub use model::{AggregateResult, Category, CategoryDirectory, Item, PageRequest};
