//! Listing entry type and rating coercion

use std::fmt;

/// Title used when a listing entry has no title node
pub const NO_TITLE: &str = "no title";

/// Detail link used when a listing entry has no link
pub const NO_LINK: &str = "no link";

/// Rating used when a listing entry has no rating node
pub const NO_RATING: &str = "no rating";

/// One listing entry extracted from a page
///
/// `rating` holds the raw token from the markup; it is only coerced to a
/// number when filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub rating: String,
    pub detail_url: String,
}

impl Item {
    pub fn new(
        title: impl Into<String>,
        rating: impl Into<String>,
        detail_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            rating: rating.into(),
            detail_url: detail_url.into(),
        }
    }

    /// The rating as a number, if the raw token is numeric
    pub fn numeric_rating(&self) -> Option<f64> {
        parse_rating(&self.rating)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})\n{}", self.title, self.rating, self.detail_url)
    }
}

/// Coerces a raw rating token into a finite number
///
/// Surrounding whitespace is ignored and a single decimal comma is accepted
/// (`"7,5"` is 7.5). Sentinels, empty strings, and non-finite values yield `None`.
pub fn parse_rating(raw: &str) -> Option<f64> {
    let token = raw.trim();
    if token.is_empty() {
        return None;
    }

    let parsed = if token.matches(',').count() == 1 && !token.contains('.') {
        token.replace(',', ".").parse::<f64>()
    } else {
        token.parse::<f64>()
    };

    parsed.ok().filter(|value| value.is_finite())
}
