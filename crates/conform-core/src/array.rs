//! Sequence helpers used by the validator: duplicate detection and ordered
//! set difference.

use serde_json::Value;

use crate::path;

/// Indices of elements whose dedup key equals the key of an earlier element.
///
/// With an empty `key` whole elements are compared structurally; otherwise
/// `key` is a path expression evaluated against every element. Elements
/// that lack the key share the same "missing" key, so the second such
/// element is reported as a duplicate of the first. First occurrences are
/// never reported.
pub fn find_duplicates(items: &[Value], key: &str) -> Vec<usize> {
    if key.is_empty() {
        return (0..items.len())
            .filter(|&index| items[..index].contains(&items[index]))
            .collect();
    }

    let keys: Vec<Option<Value>> = items.iter().map(|item| path::get(item, key)).collect();
    (0..keys.len())
        .filter(|&index| keys[..index].contains(&keys[index]))
        .collect()
}

/// Elements of `left` not present in `right`, in `left` order.
pub fn difference<'a, T: PartialEq>(left: &'a [T], right: &[T]) -> Vec<&'a T> {
    left.iter().filter(|item| !right.contains(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whole_element_duplicates() {
        let items = vec![json!(1), json!(2), json!(1), json!(3), json!(1)];
        assert_eq!(find_duplicates(&items, ""), vec![2, 4]);
    }

    #[test]
    fn test_structural_equality_for_objects() {
        let items = vec![json!({"a": 1}), json!({"a": 1}), json!({"a": 2})];
        assert_eq!(find_duplicates(&items, ""), vec![1]);
    }

    #[test]
    fn test_keyed_duplicates() {
        let items = vec![
            json!({"id": "x", "n": 1}),
            json!({"id": "y", "n": 2}),
            json!({"id": "x", "n": 3}),
        ];
        assert_eq!(find_duplicates(&items, "id"), vec![2]);
        assert!(find_duplicates(&items, "n").is_empty());
    }

    #[test]
    fn test_missing_keys_collide() {
        let items = vec![json!({"id": 1}), json!({}), json!({"other": true})];
        assert_eq!(find_duplicates(&items, "id"), vec![2]);
    }

    #[test]
    fn test_difference_preserves_order() {
        let left = ["c", "a", "b", "d"];
        let right = ["a", "d"];
        assert_eq!(difference(&left, &right), vec![&"c", &"b"]);
    }
}
