use crate::ConfigError;
use url::Url;

/// Base that site-relative links are resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOrigin {
    base: Url,
    /// ASCII serialization of the origin, e.g. `https://example.test`
    origin: String,
}

impl SiteOrigin {
    /// Builds the origin of a base URL
    ///
    /// Any path, query, or fragment on `base_url` is ignored when resolving.
    ///
    /// # Examples
    ///
    /// ```
    /// use listing_harvester::url::SiteOrigin;
    ///
    /// let origin = SiteOrigin::parse("https://example.test/movie/cat/+").unwrap();
    /// assert_eq!(origin.as_str(), "https://example.test");
    /// ```
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", base_url, e)))?;

        if base.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "'{}' has no host",
                base_url
            )));
        }

        Ok(Self {
            origin: base.origin().ascii_serialization(),
            base,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.origin
    }

    /// Resolves an href found in the site markup
    ///
    /// # Resolution Rules
    ///
    /// - `//host/path` (scheme-relative) gets the site scheme
    /// - `/path` (site-relative) is joined onto the site origin
    /// - anything else passes through unchanged
    ///
    /// # Examples
    ///
    /// ```
    /// use listing_harvester::url::SiteOrigin;
    ///
    /// let origin = SiteOrigin::parse("https://example.test").unwrap();
    /// assert_eq!(origin.resolve("/movie/cat/action+"), "https://example.test/movie/cat/action+");
    /// assert_eq!(origin.resolve("https://other.test/x"), "https://other.test/x");
    /// ```
    pub fn resolve(&self, href: &str) -> String {
        let href = href.trim();

        if !href.starts_with('/') {
            return href.to_string();
        }

        match self.base.join(href) {
            Ok(absolute_url) => absolute_url.to_string(),
            Err(e) => {
                tracing::debug!("Could not resolve '{}': {}", href, e);
                href.to_string()
            }
        }
    }
}
