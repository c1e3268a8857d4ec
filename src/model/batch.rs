//! Page requests and the outcome of a fetched batch

use crate::model::item::Item;
use crate::FetchError;
use std::fmt;
use thiserror::Error;

/// One page of one category, ready to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub category_name: String,
    pub page_url: String,
    /// 1-based page number
    pub page_index: u32,
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} page {} ({})",
            self.category_name, self.page_index, self.page_url
        )
    }
}

/// Why a page request ended up in the failure list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The task fetching or extracting the page panicked or was aborted
    #[error("Worker failed: {message}")]
    Worker { message: String },
}

/// A page request that produced no items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub request: PageRequest,
    pub reason: FailureReason,
}

/// A page request that was fetched and extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSuccess {
    pub request: PageRequest,
    /// Number of items this page contributed to `AggregateResult::items`
    pub item_count: usize,
}

/// Merged outcome of a batch of page requests
///
/// Every submitted request appears exactly once, either in `successes` or in
/// `failures`. Both lists, and `items`, follow submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateResult {
    pub items: Vec<Item>,
    pub successes: Vec<PageSuccess>,
    pub failures: Vec<PageFailure>,
}

impl AggregateResult {
    /// Number of requests this result accounts for
    pub fn total_requests(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// True when no page could be retrieved at all
    pub fn is_total_failure(&self) -> bool {
        self.successes.is_empty() && !self.failures.is_empty()
    }

    /// Iterates successful pages together with the items each contributed
    pub fn pages(&self) -> impl Iterator<Item = (&PageRequest, &[Item])> + '_ {
        let mut offset = 0;
        self.successes.iter().map(move |success| {
            let end = (offset + success.item_count).min(self.items.len());
            let start = offset.min(end);
            offset = end;
            (&success.request, &self.items[start..end])
        })
    }

    pub(crate) fn push_success(&mut self, request: PageRequest, items: Vec<Item>) {
        self.successes.push(PageSuccess {
            request,
            item_count: items.len(),
        });
        self.items.extend(items);
    }

    pub(crate) fn push_failure(&mut self, request: PageRequest, reason: FailureReason) {
        self.failures.push(PageFailure { request, reason });
    }
}
