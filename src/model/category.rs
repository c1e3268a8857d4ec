//! Category directory types

use crate::HarvestError;

/// A named grouping of listed items with its own browsing URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub url: String,
}

impl Category {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The category directory resolved from the site
///
/// Names are unique. Inserting an existing name replaces its URL but keeps the
/// position of the first occurrence, so iteration follows first-seen order
/// while the last written URL wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDirectory {
    categories: Vec<Category>,
}

impl CategoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a category, overwriting the URL of an existing name
    ///
    /// Returns the previous URL if the name was already present.
    pub fn insert(&mut self, name: impl Into<String>, url: impl Into<String>) -> Option<String> {
        let name = name.into();
        let url = url.into();

        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(existing) => Some(std::mem::replace(&mut existing.url, url)),
            None => {
                self.categories.push(Category { name, url });
                None
            }
        }
    }

    /// Looks up a category by its display name
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Resolves the user's chosen names into categories, in the order given
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Category>)` - Every name was found (possibly empty if `names` is empty)
    /// * `Err(HarvestError::UnknownCategory)` - The first name not in the directory
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Category>, HarvestError> {
        names
            .iter()
            .map(|name| {
                self.get(name.as_ref())
                    .cloned()
                    .ok_or_else(|| HarvestError::UnknownCategory(name.as_ref().to_string()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }
}

impl IntoIterator for CategoryDirectory {
    type Item = Category;
    type IntoIter = std::vec::IntoIter<Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.into_iter()
    }
}
