//! Order-preserving de-duplication.

use std::collections::HashSet;
use std::hash::Hash;

/// Remove repeated items, keeping the first occurrence of each in place
///
/// # Examples
/// ```
/// use switchgen::utils::dedup::dedup_preserving_order;
///
/// let items = vec!["7", "201", "7", "6"];
/// assert_eq!(dedup_preserving_order(items), vec!["7", "201", "6"]);
/// ```
pub fn dedup_preserving_order<I, T>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
