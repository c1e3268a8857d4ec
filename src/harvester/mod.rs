//! Harvester module: the fetch-and-extract pipeline
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching behind the `DocumentFetcher` seam
//! - Category directory and listing extraction from markup
//! - Pagination URL planning
//! - Bounded concurrent batch fetching with order-preserving merge
//! - Rating filtering

mod aggregator;
mod coordinator;
mod extractor;
mod fetcher;
mod filter;
mod planner;

pub use aggregator::{fetch_with_retry, Aggregator, AggregatorSettings};
pub use coordinator::Harvester;
pub use extractor::PageExtractor;
pub use fetcher::{build_http_client, DocumentFetcher, HttpFetcher};
pub use filter::filter_by_rating;
pub use planner::{plan_pages, PaginationPlanner};
