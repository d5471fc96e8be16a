//! Dotted-path lookup over loosely-typed JSON.
//!
//! Server responses have no stable schema, so instead of typed structs the
//! rest of the crate digs values out of a [`serde_json::Value`] tree with
//! paths like `contents.sectionListRenderer.contents.0.itemSectionRenderer`.
//! Objects are indexed by key, arrays by number. Whether a missing segment
//! is an error or just an empty/disabled feature is up to the call site.

use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum PathError {
    #[error("path {path:?} not found (missing segment {segment:?})")]
    NotFound { path: String, segment: String },
}

/// Resolve a dot-separated `path` against `root`.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Result<&'a Value, PathError> {
    let mut current = root;
    for segment in path.split('.') {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|idx| items.get(idx)),
            _ => None,
        };
        current = next.ok_or_else(|| PathError::NotFound {
            path: path.to_string(),
            segment: segment.to_string(),
        })?;
    }
    Ok(current)
}

/// Resolve a path and require the value to be a string.
pub fn resolve_str<'a>(root: &'a Value, path: &str) -> Result<&'a str, PathError> {
    resolve(root, path)?
        .as_str()
        .ok_or_else(|| PathError::NotFound {
            path: path.to_string(),
            segment: "<not a string>".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn resolves_nested_keys_and_indices() {
        let root = json!({"a": {"b": [10, 20]}});
        assert_eq!(resolve(&root, "a.b.1").unwrap(), &json!(20));
        assert_eq!(resolve(&root, "a.b.0").unwrap(), &json!(10));
        assert_eq!(resolve(&root, "a.b").unwrap(), &json!([10, 20]));
    }

    #[test]
    fn missing_key_is_not_found() {
        let root = json!({"a": {}});
        let err = resolve(&root, "a.b.1").unwrap_err();
        let PathError::NotFound { path, segment } = err;
        assert_eq!(path, "a.b.1");
        assert_eq!(segment, "b");
    }

    #[test]
    fn index_out_of_range_is_not_found() {
        let root = json!({"items": [1]});
        assert!(resolve(&root, "items.3").is_err());
    }

    #[test]
    fn indexing_a_scalar_is_not_found() {
        let root = json!({"a": 5});
        assert!(resolve(&root, "a.b").is_err());
    }

    #[test]
    fn non_numeric_index_into_array_is_not_found() {
        let root = json!({"a": [1, 2]});
        assert!(resolve(&root, "a.first").is_err());
    }

    #[test]
    fn resolve_str_rejects_non_strings() {
        let root = json!({"token": "abc", "count": 3});
        assert_eq!(resolve_str(&root, "token").unwrap(), "abc");
        assert!(resolve_str(&root, "count").is_err());
    }
}
