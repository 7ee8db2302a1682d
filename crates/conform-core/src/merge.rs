//! # Deep Merge
//!
//! Recursive combination of parsed documents:
//!
//! - object + object → merged key-wise, recursively;
//! - array + array → concatenated (target items first);
//! - anything else → the source value overwrites the target.
//!
//! Key order follows first insertion, so keys introduced by later sources
//! appear after the keys of earlier ones.

use serde_json::{Map, Value};

/// Merge `source` into `target` in place.
pub fn merge_deep(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(&key) {
                    Some(existing) => merge_deep(existing, source_value),
                    None => {
                        target_map.insert(key, source_value);
                    }
                }
            }
        }
        (Value::Array(target_items), Value::Array(source_items)) => {
            target_items.extend(source_items);
        }
        (target, source) => *target = source,
    }
}

/// Merge every source, in order, into a fresh empty object.
pub fn merge_all<I>(sources: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    let mut merged = Value::Object(Map::new());
    for source in sources {
        merge_deep(&mut merged, source);
    }
    merged
}
