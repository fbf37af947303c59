//! Grouped sums and stable rankings shared by the aggregates.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Sum values per key, visiting keys in sorted order. `None` adds nothing.
pub fn sum_by_key<K, I>(rows: I) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = (K, Option<f64>)>,
{
    let mut sums = BTreeMap::new();
    for (key, value) in rows {
        *sums.entry(key).or_insert(0.0) += value.unwrap_or(0.0);
    }
    sums
}

/// A blank key cell is a missing value and forms no group.
pub fn is_blank(key: &str) -> bool {
    key.is_empty()
}

/// Stable ascending sort by `key`.
pub fn sort_ascending<T>(rows: &mut [T], key: impl Fn(&T) -> f64) {
    rows.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal));
}

/// Stable descending sort by `key`; equal keys keep their relative order.
pub fn sort_descending<T>(rows: &mut [T], key: impl Fn(&T) -> f64) {
    rows.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
}

/// Keep the last `n` rows.
pub fn tail<T>(mut rows: Vec<T>, n: usize) -> Vec<T> {
    let start = rows.len().saturating_sub(n);
    rows.split_off(start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_by_key_skips_absent_values() {
        let sums = sum_by_key(vec![("b", Some(2.0)), ("a", None), ("b", Some(3.0)), ("a", None)]);
        let pairs: Vec<_> = sums.into_iter().collect();
        assert_eq!(pairs, vec![("a", 0.0), ("b", 5.0)]);
    }

    #[test]
    fn test_only_empty_keys_are_blank() {
        assert!(is_blank(""));
        assert!(!is_blank(" "));
        assert!(!is_blank("Unknown"));
    }

    #[test]
    fn test_descending_sort_is_stable() {
        let mut rows = vec![("x", 1.0), ("y", 3.0), ("z", 1.0), ("w", 3.0)];
        sort_descending(&mut rows, |r| r.1);
        let keys: Vec<_> = rows.iter().map(|r| r.0).collect();
        assert_eq!(keys, vec!["y", "w", "x", "z"]);
    }

    #[test]
    fn test_ascending_sort_is_stable() {
        let mut rows = vec![("x", 2.0), ("y", 1.0), ("z", 2.0)];
        sort_ascending(&mut rows, |r| r.1);
        let keys: Vec<_> = rows.iter().map(|r| r.0).collect();
        assert_eq!(keys, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_tail() {
        assert_eq!(tail(vec![1, 2, 3, 4], 2), vec![3, 4]);
        assert_eq!(tail(vec![1, 2], 5), vec![1, 2]);
        assert!(tail(Vec::<i32>::new(), 3).is_empty());
    }
}
