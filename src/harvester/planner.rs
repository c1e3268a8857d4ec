//! Pagination planner
//!
//! Expands a category URL into the URLs of its first `n` listing pages.
//!
//! # URL Grammar
//!
//! | Page | URL |
//! |------|-----|
//! | 1 | `<category><sigil>` (sigil appended only if missing) |
//! | k > 1 | `<category without trailing sigils><sigil><token>[k]<sigil>` |

use crate::config::SiteConfig;
use crate::model::{Category, PageRequest};

/// The site's pagination URL grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationPlanner {
    sigil: String,
    token: String,
}

impl PaginationPlanner {
    pub fn new(sigil: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            sigil: sigil.into(),
            token: token.into(),
        }
    }

    pub fn from_config(site: &SiteConfig) -> Self {
        Self::new(site.listing_sigil.as_str(), site.page_token.as_str())
    }

    /// Returns the URLs of pages `1..=page_count`, in order
    ///
    /// # Examples
    ///
    /// ```
    /// use listing_harvester::harvester::PaginationPlanner;
    ///
    /// let planner = PaginationPlanner::new("+", "page");
    /// let urls = planner.plan("https://example.test/movie/cat/action", 2);
    /// assert_eq!(urls, vec![
    ///     "https://example.test/movie/cat/action+".to_string(),
    ///     "https://example.test/movie/cat/action+page[2]+".to_string(),
    /// ]);
    /// ```
    pub fn plan(&self, category_url: &str, page_count: u32) -> Vec<String> {
        (1..=page_count)
            .map(|page| self.page_url(category_url, page))
            .collect()
    }

    /// URL of a single 1-based page
    pub fn page_url(&self, category_url: &str, page: u32) -> String {
        if page <= 1 {
            if category_url.ends_with(self.sigil.as_str()) {
                category_url.to_string()
            } else {
                format!("{}{}", category_url, self.sigil)
            }
        } else {
            format!(
                "{}{sigil}{}[{}]{sigil}",
                self.strip_sigils(category_url),
                self.token,
                page,
                sigil = self.sigil
            )
        }
    }

    /// Page requests for one category, pages `1..=page_count`
    pub fn requests_for(&self, category: &Category, page_count: u32) -> Vec<PageRequest> {
        self.plan(&category.url, page_count)
            .into_iter()
            .zip(1..)
            .map(|(page_url, page_index)| PageRequest {
                category_name: category.name.clone(),
                page_url,
                page_index,
            })
            .collect()
    }

    /// One flat batch for several categories, category-major
    pub fn batch_for(&self, categories: &[Category], page_count: u32) -> Vec<PageRequest> {
        categories
            .iter()
            .flat_map(|category| self.requests_for(category, page_count))
            .collect()
    }

    fn strip_sigils<'a>(&self, url: &'a str) -> &'a str {
        if self.sigil.is_empty() {
            return url;
        }

        let mut stripped = url;
        while let Some(rest) = stripped.strip_suffix(self.sigil.as_str()) {
            stripped = rest;
        }
        stripped
    }
}

/// Plans pages with an explicit grammar
pub fn plan_pages(category_url: &str, page_count: u32, sigil: &str, token: &str) -> Vec<String> {
    PaginationPlanner::new(sigil, token).plan(category_url, page_count)
}
