//! Data model shared by every harvesting stage
//!
//! # Components
//!
//! - `Category` / `CategoryDirectory`: the site's named groupings and their URLs
//! - `Item`: one listing entry as extracted from a page
//! - `PageRequest`, `PageFailure`, `AggregateResult`: one batch of page fetches and its outcome

mod batch;
mod category;
mod item;

// Re-export main types
pub use batch::{AggregateResult, FailureReason, PageFailure, PageRequest, PageSuccess};
pub use category::{Category, CategoryDirectory};
pub use item::{parse_rating, Item, NO_LINK, NO_RATING, NO_TITLE};
