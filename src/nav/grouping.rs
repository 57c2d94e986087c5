//! Presentation helpers for a category's subcategory list.
//!
//! Dense lists are shown twice in the dropdown: a short featured strip with
//! the first few entries, then an A-Z index. Both are derived on every read
//! from the cached list and never stored.

use std::collections::BTreeMap;

use crate::taxonomy::Subcategory;
use crate::util::first_letter_upper;

/// Number of subcategories surfaced as "featured", and the size above which
/// the alphabetical index is shown.
pub const FEATURED_LIMIT: usize = 4;

/// Uppercase first letter -> subcategories starting with it, in input order.
///
/// Buckets iterate in key order so the index reads A-Z. Names that are empty
/// land under the empty key.
pub type GroupedSubcategories<'a> = BTreeMap<String, Vec<&'a Subcategory>>;

/// Partition `subcategories` by the uppercased first character of their name.
///
/// The partition is stable: within a bucket the relative input order is kept
/// and no secondary sort is applied.
pub fn group(subcategories: &[Subcategory]) -> GroupedSubcategories<'_> {
    let mut grouped = GroupedSubcategories::new();
    for sub in subcategories {
        let letter = first_letter_upper(&sub.name).unwrap_or_default();
        grouped.entry(letter).or_default().push(sub);
    }
    grouped
}

/// The two sections a category dropdown renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownSections<'a> {
    /// First [`FEATURED_LIMIT`] entries in response order.
    pub featured: &'a [Subcategory],
    /// Alphabetical index, present only when the list exceeds
    /// [`FEATURED_LIMIT`].
    pub grouped: Option<GroupedSubcategories<'a>>,
}

/// Split a cached subcategory list into the dropdown's two sections.
///
/// # Arguments
///
/// * `subcategories` - The cached list for one category, in response order
///
/// # Returns
///
/// A [`DropdownSections`] borrowing from `subcategories`:
/// - `featured` is the first [`FEATURED_LIMIT`] entries (all of them when
///   the list is shorter)
/// - `grouped` is `Some` only when the list is longer than
///   [`FEATURED_LIMIT`], and then indexes every entry, featured ones included
///
/// # Examples
///
/// ```
/// use studynav::nav::grouping::present;
/// use studynav::taxonomy::Subcategory;
///
/// let subs: Vec<Subcategory> = ["Optics", "Mechanics", "Magnetism", "Acoustics", "Thermodynamics"]
///     .iter()
///     .enumerate()
///     .map(|(i, name)| Subcategory::new(format!("s{}", i), *name, "phy"))
///     .collect();
///
/// let sections = present(&subs);
/// assert_eq!(sections.featured.len(), 4);
///
/// let grouped = sections.grouped.unwrap();
/// let letters: Vec<&str> = grouped.keys().map(String::as_str).collect();
/// assert_eq!(letters, ["A", "M", "O", "T"]);
///
/// // Short lists get no index.
/// assert!(present(&subs[..3]).grouped.is_none());
/// ```
pub fn present(subcategories: &[Subcategory]) -> DropdownSections<'_> {
    let featured = &subcategories[..subcategories.len().min(FEATURED_LIMIT)];
    let grouped = (subcategories.len() > FEATURED_LIMIT).then(|| group(subcategories));
    DropdownSections { featured, grouped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn subs(names: &[&str]) -> Vec<Subcategory> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Subcategory::new(format!("s{}", i), *n, "c1"))
            .collect()
    }

    fn names<'a>(items: &[&'a Subcategory]) -> Vec<&'a str> {
        items.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_group_by_uppercase_letter_keeps_input_order() {
        let input = subs(&["Algebra", "algorithms", "Biology"]);
        let grouped = group(&input);

        assert_eq!(grouped.len(), 2);
        assert_eq!(names(&grouped["A"]), vec!["Algebra", "algorithms"]);
        assert_eq!(names(&grouped["B"]), vec!["Biology"]);
    }

    #[test]
    fn test_group_does_not_sort_within_bucket() {
        let input = subs(&["Zeta", "zebra", "Zapping"]);
        let grouped = group(&input);
        assert_eq!(names(&grouped["Z"]), vec!["Zeta", "zebra", "Zapping"]);
    }

    #[test]
    fn test_group_keys_iterate_alphabetically() {
        let input = subs(&["Physics", "chemistry", "Astronomy"]);
        let grouped = group(&input);
        let keys: Vec<&str> = grouped.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["A", "C", "P"]);
    }

    #[test]
    fn test_group_empty_name_and_non_ascii() {
        let input = subs(&["", "éthique", "Économie"]);
        let grouped = group(&input);
        assert_eq!(names(&grouped[""]), vec![""]);
        assert_eq!(names(&grouped["É"]), vec!["éthique", "Économie"]);
    }

    #[test]
    fn test_present_small_list_has_no_index() {
        let input = subs(&["A", "B", "C", "D"]);
        let sections = present(&input);
        assert_eq!(sections.featured.len(), 4);
        assert!(sections.grouped.is_none());
    }

    #[test]
    fn test_present_large_list_features_first_four() {
        let input = subs(&["Mech", "Optics", "Waves", "Heat", "Atoms"]);
        let sections = present(&input);

        let featured: Vec<&str> = sections.featured.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(featured, vec!["Mech", "Optics", "Waves", "Heat"]);

        let grouped = sections.grouped.unwrap();
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, 5);
        assert_eq!(names(&grouped["A"]), vec!["Atoms"]);
    }

    #[test]
    fn test_present_empty_list() {
        let sections = present(&[]);
        assert!(sections.featured.is_empty());
        assert!(sections.grouped.is_none());
    }

    proptest! {
        #[test]
        fn prop_group_is_a_stable_partition(raw in proptest::collection::vec("[a-zA-Z]{0,6}", 0..40)) {
            let input: Vec<Subcategory> = raw
                .iter()
                .enumerate()
                .map(|(i, n)| Subcategory::new(i.to_string(), n.clone(), "c"))
                .collect();
            let grouped = group(&input);

            let total: usize = grouped.values().map(Vec::len).sum();
            prop_assert_eq!(total, input.len());

            for (letter, bucket) in &grouped {
                let mut last_index = None;
                for sub in bucket {
                    prop_assert_eq!(&first_letter_upper(&sub.name).unwrap_or_default(), letter);
                    let index: usize = sub.id.parse().unwrap();
                    if let Some(prev) = last_index {
                        prop_assert!(index > prev);
                    }
                    last_index = Some(index);
                }
            }
        }
    }
}
