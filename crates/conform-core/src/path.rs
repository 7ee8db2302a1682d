//! # Path Expressions
//!
//! A small language for addressing nested locations in a `serde_json::Value`:
//!
//! ```text
//! server.listen[0].port
//! plugins["auth.jwt"].enabled
//! users[].emails[].address
//! ```
//!
//! Segments are separated by `.` or wrapped in brackets, optionally quoted
//! with `'` or `"`. Optional-chaining markers (`?.`) act as plain separators.
//! An empty bracket pair `[]` is a wildcard over the elements of the array at
//! that position and is only valid when reading.
//!
//! ## Failure Policy
//!
//! Access is best-effort. [`get`] returns `None` for malformed paths,
//! missing keys, and type mismatches. [`set`] silently does nothing when the
//! write cannot be performed; [`try_set`] reports why.
//!
//! ## Array Indices
//!
//! A segment addresses an array element only when it is a canonical
//! non-negative integer: `"3"` is an index, `"03"`, `"+3"` and `"-3"` are not.
//! Writes pad arrays with nulls, but never by more than [`MAX_ARRAY_GAP`]
//! elements; a farther index leaves the document untouched.

use serde_json::{Map, Value};

use crate::error::PathError;
use crate::kind::Kind;

const WILDCARD: &str = "[]";

/// Largest number of nulls a single write may insert before its index.
pub const MAX_ARRAY_GAP: usize = 4096;

/// Split a path expression into access tokens.
///
/// # Errors
///
/// Returns a [`PathError`] for unbalanced brackets, unterminated quotes and
/// wildcards.
pub fn tokenize(path: &str) -> Result<Vec<String>, PathError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = path.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '.' => flush(&mut tokens, &mut current),
            '?' if matches!(chars.peek(), Some((_, '.'))) => {
                chars.next();
                flush(&mut tokens, &mut current);
            }
            '[' => {
                flush(&mut tokens, &mut current);
                let quote = match chars.peek() {
                    Some(&(_, q)) if q == '\'' || q == '"' => Some(q),
                    _ => None,
                };

                let mut segment = String::new();
                match quote {
                    Some(q) => {
                        let (quote_offset, _) = chars.next().ok_or_else(|| unclosed(path, offset))?;
                        loop {
                            match chars.next() {
                                Some((_, ch)) if ch == q => break,
                                Some((_, ch)) => segment.push(ch),
                                None => {
                                    return Err(PathError::UnterminatedQuote {
                                        path: path.to_string(),
                                        offset: quote_offset,
                                    })
                                }
                            }
                        }
                        match chars.next() {
                            Some((_, ']')) => {}
                            _ => return Err(unclosed(path, offset)),
                        }
                    }
                    None => {
                        loop {
                            match chars.next() {
                                Some((_, ']')) => break,
                                Some((_, ch)) => segment.push(ch),
                                None => return Err(unclosed(path, offset)),
                            }
                        }
                        if segment.is_empty() {
                            return Err(PathError::Wildcard {
                                path: path.to_string(),
                            });
                        }
                    }
                }
                tokens.push(segment);
            }
            ']' => {
                return Err(PathError::UnexpectedBracket {
                    path: path.to_string(),
                    offset,
                })
            }
            other => current.push(other),
        }
    }
    flush(&mut tokens, &mut current);

    Ok(tokens)
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

fn unclosed(path: &str, offset: usize) -> PathError {
    PathError::UnclosedBracket {
        path: path.to_string(),
        offset,
    }
}

/// Interpret a token as an array index if it is a canonical integer literal.
pub fn array_index(token: &str) -> Option<usize> {
    token
        .parse::<usize>()
        .ok()
        .filter(|index| index.to_string().len() == token.len())
}

/// Borrow the value at a wildcard-free path.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let tokens = tokenize(path).ok()?;
    tokens.iter().try_fold(root, |current, token| step(current, token))
}

fn step<'a>(current: &'a Value, token: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(token),
        Value::Array(items) => array_index(token).and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Read the value at `path`.
///
/// Without wildcards this is a single lookup. With wildcards the result is
/// an array collecting the matches of every element; each nested wildcard
/// level is flattened into its parent, leaf values are kept as they are, and
/// elements where the remainder resolves to nothing are skipped.
pub fn get(root: &Value, path: &str) -> Option<Value> {
    if path.contains(WILDCARD) {
        let parts: Vec<&str> = path.split(WILDCARD).collect();
        resolve_wildcards(root, &parts)
    } else {
        lookup(root, path).cloned()
    }
}

fn resolve_wildcards(root: &Value, parts: &[&str]) -> Option<Value> {
    match parts {
        [] => None,
        [last] => lookup(root, last).cloned(),
        [first, rest @ ..] => {
            let items = lookup(root, first)?.as_array()?;
            let nested = rest.len() > 1;
            let mut out = Vec::new();
            for item in items {
                match resolve_wildcards(item, rest) {
                    Some(Value::Array(inner)) if nested => out.extend(inner),
                    Some(value) => out.push(value),
                    None => {}
                }
            }
            Some(Value::Array(out))
        }
    }
}

/// Write `value` at `path`, creating missing containers on the way.
///
/// A missing (or null) intermediate becomes an array when the following
/// segment is an index and an object otherwise. Writes that cannot be
/// performed are ignored.
pub fn set(root: &mut Value, path: &str, value: Value) {
    let _ = try_set(root, path, value);
}

/// Like [`set`] but reports why a write was not performed.
///
/// Containers created before the failing segment are kept.
pub fn try_set(root: &mut Value, path: &str, value: Value) -> Result<(), PathError> {
    let tokens = tokenize(path)?;
    if tokens.is_empty() {
        return Err(PathError::Empty);
    }
    check_reach(root, &tokens)?;
    assign(root, &tokens, value)
}

/// Walk the existing tree read-only and reject indices that would pad an
/// array past [`MAX_ARRAY_GAP`], so a failing write creates nothing.
fn check_reach(root: &Value, tokens: &[String]) -> Result<(), PathError> {
    let mut current = Some(root);
    for token in tokens {
        current = match current {
            Some(Value::Object(map)) => map.get(token.as_str()),
            Some(Value::Array(items)) => match array_index(token) {
                Some(index) => {
                    within_reach(token, index, items.len())?;
                    items.get(index)
                }
                None => return Ok(()),
            },
            None | Some(Value::Null) => {
                if let Some(index) = array_index(token) {
                    within_reach(token, index, 0)?;
                }
                None
            }
            Some(_) => return Ok(()),
        };
    }
    Ok(())
}

fn within_reach(token: &str, index: usize, len: usize) -> Result<(), PathError> {
    match index.checked_sub(len) {
        Some(gap) if gap > MAX_ARRAY_GAP => Err(PathError::IndexOutOfReach {
            token: token.to_string(),
            len,
        }),
        _ => Ok(()),
    }
}

fn assign(current: &mut Value, tokens: &[String], value: Value) -> Result<(), PathError> {
    let Some((token, rest)) = tokens.split_first() else {
        return Err(PathError::Empty);
    };

    let slot = slot_mut(current, token)?;
    if rest.is_empty() {
        *slot = value;
        return Ok(());
    }

    if slot.is_null() {
        *slot = if array_index(&rest[0]).is_some() {
            Value::Array(Vec::new())
        } else {
            Value::Object(Map::new())
        };
    }
    assign(slot, rest, value)
}

/// Get or create the slot for `token` inside a container.
///
/// Arrays are padded with nulls up to the requested index.
fn slot_mut<'a>(current: &'a mut Value, token: &str) -> Result<&'a mut Value, PathError> {
    let kind = Kind::of(current);
    match current {
        Value::Object(map) => Ok(map.entry(token.to_string()).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = array_index(token).ok_or_else(|| PathError::Unwritable {
                token: token.to_string(),
                kind,
            })?;
            within_reach(token, index, items.len())?;
            if items.len() <= index {
                let new_len = index.checked_add(1).ok_or_else(|| PathError::IndexOutOfReach {
                    token: token.to_string(),
                    len: items.len(),
                })?;
                items.resize(new_len, Value::Null);
            }
            Ok(&mut items[index])
        }
        _ => Err(PathError::Unwritable {
            token: token.to_string(),
            kind,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tokenize_dots_and_brackets() {
        assert_eq!(tokenize("a.b[0].c").unwrap(), vec!["a", "b", "0", "c"]);
        assert_eq!(tokenize(r#"a["x.y"]['z']"#).unwrap(), vec!["a", "x.y", "z"]);
        assert_eq!(tokenize("a?.b?.[1]").unwrap(), vec!["a", "b", "1"]);
        assert_eq!(tokenize("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_tokenize_errors() {
        assert!(matches!(tokenize("a[0"), Err(PathError::UnclosedBracket { .. })));
        assert!(matches!(tokenize("a['x]"), Err(PathError::UnterminatedQuote { .. })));
        assert!(matches!(tokenize("a]"), Err(PathError::UnexpectedBracket { .. })));
        assert!(matches!(tokenize("a[].b"), Err(PathError::Wildcard { .. })));
    }

    #[test]
    fn test_array_index_requires_canonical_form() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("42"), Some(42));
        assert_eq!(array_index("01"), None);
        assert_eq!(array_index("+1"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("1.0"), None);
        assert_eq!(array_index("x"), None);
    }

    #[test]
    fn test_get_direct() {
        let doc = json!({"a": {"b": [10, {"c": "deep"}]}});
        assert_eq!(get(&doc, "a.b[0]"), Some(json!(10)));
        assert_eq!(get(&doc, "a.b[1].c"), Some(json!("deep")));
        assert_eq!(get(&doc, "a.b.1.c"), Some(json!("deep")));
        assert_eq!(get(&doc, ""), Some(doc.clone()));
    }

    #[test]
    fn test_get_missing_is_none() {
        let doc = json!({"a": {"b": null}, "list": [1]});
        assert_eq!(get(&doc, "a.x"), None);
        assert_eq!(get(&doc, "a.b.c"), None);
        assert_eq!(get(&doc, "list[5]"), None);
        assert_eq!(get(&doc, "list[01]"), None);
        assert_eq!(get(&doc, "a[0"), None);
        assert_eq!(get(&doc, "a.b"), Some(Value::Null));
    }

    #[test]
    fn test_get_wildcard() {
        let doc = json!({"a": [{"b": 1}, {"b": 2}]});
        assert_eq!(get(&doc, "a[].b"), Some(json!([1, 2])));
        assert_eq!(get(&doc, "a[]"), Some(json!([{"b": 1}, {"b": 2}])));
    }

    #[test]
    fn test_get_nested_wildcards_flatten_one_level_each() {
        let doc = json!({
            "users": [
                {"emails": [{"address": "a@x"}, {"address": "b@x"}]},
                {"emails": []},
                {"emails": [{"address": "c@x"}]},
                {"name": "no emails"}
            ]
        });
        assert_eq!(
            get(&doc, "users[].emails[].address"),
            Some(json!(["a@x", "b@x", "c@x"]))
        );
    }

    #[test]
    fn test_get_wildcard_keeps_leaf_arrays() {
        let doc = json!({"groups": [{"tags": ["x", "y"]}, {"tags": ["z"]}, {}]});
        assert_eq!(get(&doc, "groups[].tags"), Some(json!([["x", "y"], ["z"]])));
    }

    #[test]
    fn test_get_wildcard_on_non_array() {
        let doc = json!({"a": {"b": 1}});
        assert_eq!(get(&doc, "a[].b"), None);
        assert_eq!(get(&doc, "missing[].b"), None);
    }

    #[test]
    fn test_set_creates_containers() {
        let mut doc = json!({});
        set(&mut doc, "a[0].b", json!(5));
        assert_eq!(doc, json!({"a": [{"b": 5}]}));
    }

    #[test]
    fn test_set_non_canonical_index_creates_object() {
        let mut doc = json!({});
        set(&mut doc, "a.01", json!(true));
        assert_eq!(doc, json!({"a": {"01": true}}));
    }

    #[test]
    fn test_set_replaces_null_intermediate() {
        let mut doc = json!({"a": null});
        set(&mut doc, "a.b.c", json!("v"));
        assert_eq!(doc, json!({"a": {"b": {"c": "v"}}}));
    }

    #[test]
    fn test_set_pads_arrays() {
        let mut doc = json!({"list": [1]});
        set(&mut doc, "list[3]", json!(4));
        assert_eq!(doc, json!({"list": [1, null, null, 4]}));
    }

    #[test]
    fn test_set_far_index_leaves_document_untouched() {
        let original = json!({"list": [1]});
        for path in [
            "a[18446744073709551615]",
            "a[1000000000]",
            "list[1000000000]",
            "list[0].x[99999].y",
        ] {
            let mut doc = original.clone();
            set(&mut doc, path, json!(1));
            assert_eq!(doc, original, "path {path}");
        }
    }

    #[test]
    fn test_try_set_reports_index_out_of_reach() {
        let mut doc = json!({"list": [1, 2]});
        let err = try_set(&mut doc, "list[18446744073709551615]", json!(0)).unwrap_err();
        assert_eq!(
            err,
            PathError::IndexOutOfReach {
                token: "18446744073709551615".to_string(),
                len: 2
            }
        );

        let edge = 2 + MAX_ARRAY_GAP;
        try_set(&mut doc, &format!("list[{edge}]"), json!(0)).unwrap();
        assert_eq!(doc["list"].as_array().unwrap().len(), edge + 1);
    }

    #[test]
    fn test_set_overwrites_existing() {
        let mut doc = json!({"server": {"port": 80, "host": "h"}});
        set(&mut doc, "server.port", json!(8080));
        assert_eq!(doc, json!({"server": {"port": 8080, "host": "h"}}));
    }

    #[test]
    fn test_set_failures_are_silent() {
        let original = json!({"a": "scalar", "list": [1, 2]});

        let mut doc = original.clone();
        set(&mut doc, "a.b", json!(1));
        assert_eq!(doc, original);

        set(&mut doc, "list.name", json!(1));
        assert_eq!(doc, original);

        set(&mut doc, "a[", json!(1));
        assert_eq!(doc, original);

        set(&mut doc, "list[].x", json!(1));
        assert_eq!(doc, original);

        set(&mut doc, "", json!(1));
        assert_eq!(doc, original);
    }

    #[test]
    fn test_try_set_reports_reason() {
        let mut doc = json!({"a": 1});
        let err = try_set(&mut doc, "a.b", json!(2)).unwrap_err();
        assert_eq!(
            err,
            PathError::Unwritable {
                token: "b".to_string(),
                kind: Kind::Number
            }
        );
        assert_eq!(try_set(&mut doc, "", json!(2)).unwrap_err(), PathError::Empty);
    }
}
