//! Concurrent aggregator
//!
//! This module fetches and extracts a batch of listing pages:
//! - At most `max_concurrent` fetches in flight, gated by a semaphore
//! - Bounded retry of timeouts and network errors
//! - Extraction on the blocking pool, since parsed documents are not `Send`
//! - One collecting point that merges outcomes back into submission order
//!
//! Dropping the future returned by [`Aggregator::aggregate_with_limit`] aborts the batch:
//! in-flight fetches are cancelled and unstarted requests are never issued.

use crate::config::AggregatorConfig;
use crate::harvester::extractor::PageExtractor;
use crate::harvester::fetcher::DocumentFetcher;
use crate::model::{AggregateResult, FailureReason, Item, PageRequest};
use crate::FetchError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Concurrency and retry policy for one aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorSettings {
    /// Maximum number of requests in flight (at least 1)
    pub max_concurrent: usize,

    /// Extra attempts for retryable failures
    pub max_retries: u32,

    /// Pause before each retry
    pub retry_delay: Duration,
}

impl From<&AggregatorConfig> for AggregatorSettings {
    fn from(config: &AggregatorConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent_requests as usize,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self::from(&AggregatorConfig::default())
    }
}

type PageOutcome = Result<Vec<Item>, FailureReason>;

/// Fetches and extracts batches of page requests
pub struct Aggregator {
    fetcher: Arc<dyn DocumentFetcher>,
    extractor: Arc<PageExtractor>,
    settings: AggregatorSettings,
}

impl Aggregator {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        extractor: Arc<PageExtractor>,
        settings: AggregatorSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            settings,
        }
    }

    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    /// Fetches and extracts every request of the batch with the configured limit
    pub async fn aggregate(&self, requests: Vec<PageRequest>) -> AggregateResult {
        self.aggregate_with_limit(requests, self.settings.max_concurrent)
            .await
    }

    /// Fetches and extracts every request of the batch
    ///
    /// At most `concurrency_limit` requests are in flight at once; a limit of
    /// 0 is treated as 1. Retry policy still comes from the settings.
    ///
    /// # Guarantees
    ///
    /// - every request ends up exactly once in `successes` or `failures`
    /// - `items`, `successes`, and `failures` follow submission order
    /// - a failing page never aborts its siblings
    pub async fn aggregate_with_limit(
        &self,
        requests: Vec<PageRequest>,
        concurrency_limit: usize,
    ) -> AggregateResult {
        let total = requests.len();
        let limit = concurrency_limit.max(1);
        let semaphore = Arc::new(Semaphore::new(limit));
        let mut tasks = JoinSet::new();

        tracing::debug!("Fetching {} pages with at most {} in flight", total, limit);

        for (index, request) in requests.iter().enumerate() {
            // The semaphore is local and never closed
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };

            let fetcher = Arc::clone(&self.fetcher);
            let extractor = Arc::clone(&self.extractor);
            let settings = self.settings;
            let url = request.page_url.clone();

            tasks.spawn(async move {
                let outcome = fetch_and_extract(fetcher, extractor, url, settings).await;
                drop(permit);
                (index, outcome)
            });
        }

        // Single collecting point: completions arrive in any order
        let mut slots: Vec<Option<PageOutcome>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => tracing::error!("Page task failed: {}", e),
            }
        }

        let mut result = AggregateResult::default();
        for (request, slot) in requests.into_iter().zip(slots) {
            match slot {
                Some(Ok(items)) => {
                    tracing::debug!("{}: {} items", request, items.len());
                    result.push_success(request, items);
                }
                Some(Err(reason)) => {
                    tracing::warn!("{} failed: {}", request, reason);
                    result.push_failure(request, reason);
                }
                None => {
                    let reason = FailureReason::Worker {
                        message: "task panicked or was aborted".to_string(),
                    };
                    tracing::warn!("{} failed: {}", request, reason);
                    result.push_failure(request, reason);
                }
            }
        }

        tracing::info!(
            "Batch finished: {} pages ok, {} failed, {} items",
            result.successes.len(),
            result.failures.len(),
            result.items.len()
        );

        result
    }
}

/// Fetches one page (with retries) and extracts its items
async fn fetch_and_extract(
    fetcher: Arc<dyn DocumentFetcher>,
    extractor: Arc<PageExtractor>,
    url: String,
    settings: AggregatorSettings,
) -> PageOutcome {
    let body = fetch_with_retry(
        fetcher.as_ref(),
        &url,
        settings.max_retries,
        settings.retry_delay,
    )
    .await?;

    tokio::task::spawn_blocking(move || extractor.extract_items(&body))
        .await
        .map_err(|e| FailureReason::Worker {
            message: format!("extraction of {} failed: {}", url, e),
        })
}

/// Fetches a URL, retrying timeouts and network errors up to `max_retries` times
///
/// Status errors are returned immediately.
pub async fn fetch_with_retry(
    fetcher: &dyn DocumentFetcher,
    url: &str,
    max_retries: u32,
    retry_delay: Duration,
) -> Result<String, FetchError> {
    let mut attempt = 0;
    loop {
        match fetcher.fetch(url).await {
            Ok(body) => return Ok(body),
            Err(e) if e.is_retryable() && attempt < max_retries => {
                attempt += 1;
                tracing::warn!(
                    "Fetching {} failed ({}), retry {}/{}",
                    url,
                    e,
                    attempt,
                    max_retries
                );
                if !retry_delay.is_zero() {
                    tokio::time::sleep(retry_delay).await;
                }
            }
            Err(e) => return Err(e),
        }
    }
}
