use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for Listing-Harvester
///
/// Every section is optional; missing sections and keys fall back to the
/// layout of the site the harvester was written for.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub http: HttpConfig,
    pub aggregator: AggregatorConfig,
}

/// Target site and its pagination URL grammar
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host that relative links are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the page holding the category directory
    #[serde(rename = "directory-path")]
    pub directory_path: String,

    /// Suffix marking a URL as a listing page
    #[serde(rename = "listing-sigil")]
    pub listing_sigil: String,

    /// Page-index token, rendered as `<token>[<k>]`
    #[serde(rename = "page-token")]
    pub page_token: String,
}

impl SiteConfig {
    /// Absolute URL of the category directory page
    pub fn directory_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.directory_path
        )
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ekino-tv.pl".to_string(),
            directory_path: "/movie/cat/+".to_string(),
            listing_sigil: "+".to_string(),
            page_token: "strona".to_string(),
        }
    }
}

/// CSS selectors describing the site markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// The single container holding the category directory
    #[serde(rename = "category-container")]
    pub category_container: String,

    /// Anchors inside the category container
    #[serde(rename = "category-link")]
    pub category_link: String,

    /// One listing entry
    pub item: String,

    /// Title node inside a listing entry
    pub title: String,

    /// Detail link inside the title node
    pub link: String,

    /// Rating node inside a listing entry
    pub rating: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            category_container: "div.col-md-4.menu-wrap".to_string(),
            category_link: "a".to_string(),
            item: "div.movies-list-item".to_string(),
            title: "div.title".to_string(),
            link: "a".to_string(),
            rating: "div.sum-vote".to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Extra headers sent with every request
    pub headers: BTreeMap<String, String>,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0".to_string(),
            headers: BTreeMap::new(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Batch fetching behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Maximum number of page fetches in flight at once
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: u32,

    /// Extra attempts for a page that failed with a timeout or network error
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Pause before a retry (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 8,
            max_retries: 1,
            retry_delay_ms: 250,
        }
    }
}
