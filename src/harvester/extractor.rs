//! Page extractor
//!
//! This module turns raw listing-site markup into structured records:
//! - The category directory (name to URL) from the directory page
//! - The listing entries (title, rating, detail link) of one listing page
//!
//! Individual malformed entries never fail a page; missing fields fall back
//! to the sentinels in [`crate::model`].

use crate::config::SelectorConfig;
use crate::model::{CategoryDirectory, Item, NO_LINK, NO_RATING, NO_TITLE};
use crate::url::SiteOrigin;
use crate::{ConfigError, ExtractError};
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors plus the origin used to resolve links
///
/// Built once per harvester and shared read-only between worker threads.
#[derive(Debug, Clone)]
pub struct PageExtractor {
    origin: SiteOrigin,
    category_container: Selector,
    category_container_source: String,
    category_link: Selector,
    item: Selector,
    title: Selector,
    link: Selector,
    rating: Selector,
}

impl PageExtractor {
    /// Compiles the configured selectors
    ///
    /// # Returns
    ///
    /// * `Ok(PageExtractor)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that does not parse
    pub fn new(selectors: &SelectorConfig, origin: SiteOrigin) -> Result<Self, ConfigError> {
        Ok(Self {
            origin,
            category_container: compile(&selectors.category_container)?,
            category_container_source: selectors.category_container.clone(),
            category_link: compile(&selectors.category_link)?,
            item: compile(&selectors.item)?,
            title: compile(&selectors.title)?,
            link: compile(&selectors.link)?,
            rating: compile(&selectors.rating)?,
        })
    }

    /// Extracts the category directory from the directory page
    ///
    /// Anchors without an `href` or without text are skipped. A repeated name
    /// overwrites the earlier URL.
    ///
    /// # Returns
    ///
    /// * `Ok(CategoryDirectory)` - The directory, possibly empty if the container has no anchors
    /// * `Err(ExtractError::StructureNotFound)` - The directory container is absent
    pub fn extract_categories(&self, html: &str) -> Result<CategoryDirectory, ExtractError> {
        let document = Html::parse_document(html);

        let container = document
            .select(&self.category_container)
            .next()
            .ok_or_else(|| ExtractError::StructureNotFound {
                selector: self.category_container_source.clone(),
            })?;

        let mut directory = CategoryDirectory::new();
        for anchor in container.select(&self.category_link) {
            let name = element_text(anchor);
            let href = anchor.value().attr("href").map(str::trim).unwrap_or("");

            if name.is_empty() || href.is_empty() {
                tracing::debug!("Skipping category anchor without name or href");
                continue;
            }

            if let Some(previous) = directory.insert(name.clone(), self.origin.resolve(href)) {
                tracing::debug!("Category '{}' listed twice, replacing {}", name, previous);
            }
        }

        Ok(directory)
    }

    /// Extracts the listing entries of one page, in document order
    ///
    /// A page without any entry yields an empty list.
    pub fn extract_items(&self, html: &str) -> Vec<Item> {
        let document = Html::parse_document(html);

        document
            .select(&self.item)
            .map(|entry| self.extract_item(entry))
            .collect()
    }

    fn extract_item(&self, entry: ElementRef<'_>) -> Item {
        let title_node = entry.select(&self.title).next();

        let title = title_node
            .map(element_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());

        let detail_url = title_node
            .and_then(|node| node.select(&self.link).next())
            .and_then(|anchor| anchor.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(|href| self.origin.resolve(href))
            .unwrap_or_else(|| NO_LINK.to_string());

        let rating = entry
            .select(&self.rating)
            .next()
            .map(element_text)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_RATING.to_string());

        Item {
            title,
            rating,
            detail_url,
        }
    }
}

/// Compiles one CSS selector
fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Text content of an element with whitespace runs collapsed
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
