//! Harvester coordinator - the public entry points
//!
//! This module wires the pipeline stages together:
//! - Category discovery: fetch the directory page once and extract it
//! - Listing: plan page URLs, then fetch and extract them as one batch
//!
//! Filtering is pure and lives in [`crate::harvester::filter_by_rating`].

use crate::config::{validate, Config};
use crate::harvester::aggregator::{fetch_with_retry, Aggregator, AggregatorSettings};
use crate::harvester::extractor::PageExtractor;
use crate::harvester::fetcher::{DocumentFetcher, HttpFetcher};
use crate::harvester::planner::PaginationPlanner;
use crate::model::{AggregateResult, Category, CategoryDirectory};
use crate::url::SiteOrigin;
use crate::{ExtractError, HarvestError};
use std::sync::Arc;

/// Category discovery and listing retrieval for one site
///
/// All state is read-only after construction, so a single harvester can
/// serve many calls.
pub struct Harvester {
    config: Arc<Config>,
    fetcher: Arc<dyn DocumentFetcher>,
    extractor: Arc<PageExtractor>,
    planner: PaginationPlanner,
    aggregator: Aggregator,
}

impl Harvester {
    /// Creates a harvester that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Ready to use
    /// * `Err(HarvestError)` - Invalid configuration or HTTP client failure
    ///
    /// # Example
    ///
    /// ```no_run
    /// use listing_harvester::{Config, Harvester};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let harvester = Harvester::new(Config::default())?;
    /// let directory = harvester.discover_categories().await?;
    /// let selected = directory.select(&["Akcja"])?;
    /// let result = harvester.list_categories(&selected, 3).await?;
    /// println!("{} items, {} failed pages", result.items.len(), result.failures.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Creates a harvester around any document fetcher
    pub fn with_fetcher(
        config: Config,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Result<Self, HarvestError> {
        validate(&config)?;

        let origin = SiteOrigin::parse(&config.site.base_url)?;
        let extractor = Arc::new(PageExtractor::new(&config.selectors, origin)?);
        let planner = PaginationPlanner::from_config(&config.site);
        let aggregator = Aggregator::new(
            Arc::clone(&fetcher),
            Arc::clone(&extractor),
            AggregatorSettings::from(&config.aggregator),
        );

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            extractor,
            planner,
            aggregator,
        })
    }

    /// Fetches the directory page and extracts the category directory
    ///
    /// # Returns
    ///
    /// * `Ok(CategoryDirectory)` - The directory; empty only if the container held no links
    /// * `Err(HarvestError::Fetch)` - The directory page could not be retrieved
    /// * `Err(HarvestError::StructureNotFound)` - The page no longer has the directory container
    pub async fn discover_categories(&self) -> Result<CategoryDirectory, HarvestError> {
        let url = self.config.site.directory_url();
        let settings = self.aggregator.settings();

        tracing::info!("Discovering categories from {}", url);

        let body = fetch_with_retry(
            self.fetcher.as_ref(),
            &url,
            settings.max_retries,
            settings.retry_delay,
        )
        .await
        .map_err(|source| HarvestError::Fetch {
            url: url.clone(),
            source,
        })?;

        let directory = self
            .extractor
            .extract_categories(&body)
            .map_err(|e| match e {
                ExtractError::StructureNotFound { selector } => {
                    HarvestError::StructureNotFound {
                        url: url.clone(),
                        selector,
                    }
                }
            })?;

        tracing::info!("Found {} categories", directory.len());
        Ok(directory)
    }

    /// Lists the first `page_count` pages of one category URL
    ///
    /// Page failures never fail the call; they are reported in
    /// `AggregateResult::failures`.
    pub async fn list_items(
        &self,
        category_url: &str,
        page_count: u32,
    ) -> Result<AggregateResult, HarvestError> {
        let category = Category::new(category_url, category_url);
        self.list_categories(std::slice::from_ref(&category), page_count)
            .await
    }

    /// Lists the first `page_count` pages of every category as one batch
    ///
    /// Requests are ordered category-major: all pages of the first category,
    /// then all pages of the next.
    pub async fn list_categories(
        &self,
        categories: &[Category],
        page_count: u32,
    ) -> Result<AggregateResult, HarvestError> {
        if page_count < 1 {
            return Err(HarvestError::InvalidPageCount(page_count));
        }

        let requests = self.planner.batch_for(categories, page_count);
        tracing::info!(
            "Listing {} categories, {} pages each ({} requests)",
            categories.len(),
            page_count,
            requests.len()
        );

        let result = self.aggregator.aggregate(requests).await;
        if result.is_total_failure() {
            tracing::warn!("No page could be retrieved");
        }

        Ok(result)
    }
}
