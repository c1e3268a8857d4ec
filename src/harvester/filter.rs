//! Rating filter

use crate::model::Item;

/// Keeps items whose rating parses as a number of at least `min_rating`
///
/// Input order is preserved. Items with an unparseable rating (including the
/// "no rating" sentinel) are always dropped. A threshold of 0 or below keeps
/// every numeric rating, negative ones included.
///
/// # Examples
///
/// ```
/// use listing_harvester::{filter_by_rating, Item};
///
/// let items = vec![
///     Item::new("A", "7.5", "https://example.test/a"),
///     Item::new("B", "n/a", "https://example.test/b"),
///     Item::new("C", "3.0", "https://example.test/c"),
/// ];
/// let kept = filter_by_rating(items, 5.0);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].title, "A");
/// ```
pub fn filter_by_rating(items: impl IntoIterator<Item = Item>, min_rating: f64) -> Vec<Item> {
    items
        .into_iter()
        .filter(|item| match item.numeric_rating() {
            Some(_) if min_rating <= 0.0 => true,
            Some(rating) => rating >= min_rating,
            None => {
                tracing::trace!("Dropping '{}': rating '{}' is not numeric", item.title, item.rating);
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NO_LINK, NO_RATING};

    fn item(title: &str, rating: &str) -> Item {
        Item::new(title, rating, NO_LINK)
    }

    fn titles(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    fn sample() -> Vec<Item> {
        vec![
            item("A", "7.5"),
            item("B", "n/a"),
            item("C", "3.0"),
            item("D", NO_RATING),
            item("E", "5"),
            item("F", "9,1"),
            item("G", "0"),
        ]
    }

    #[test]
    fn test_threshold_scenario() {
        let items = vec![item("A", "7.5"), item("B", "n/a"), item("C", "3.0")];
        let kept = filter_by_rating(items, 5.0);
        assert_eq!(kept, vec![item("A", "7.5")]);
    }

    #[test]
    fn test_zero_threshold_keeps_every_numeric_rating() {
        let kept = filter_by_rating(sample(), 0.0);
        assert_eq!(titles(&kept), vec!["A", "C", "E", "F", "G"]);
    }

    #[test]
    fn test_zero_threshold_keeps_negative_ratings() {
        let items = vec![item("neg", "-1.5"), item("ok", "2"), item("none", NO_RATING)];
        let kept = filter_by_rating(items, 0.0);
        assert_eq!(titles(&kept), vec!["neg", "ok"]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let kept = filter_by_rating(sample(), 5.0);
        assert_eq!(titles(&kept), vec!["A", "E", "F"]);
    }

    #[test]
    fn test_raising_threshold_never_grows_result() {
        let mut previous = usize::MAX;
        for step in 0..=20 {
            let threshold = step as f64 * 0.5;
            let kept = filter_by_rating(sample(), threshold).len();
            assert!(kept <= previous, "threshold {} kept {}", threshold, kept);
            previous = kept;
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_by_rating(Vec::new(), 3.0).is_empty());
    }
}
