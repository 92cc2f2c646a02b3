use std::collections::HashMap;

use serde_json::Value as Json;

use crate::index::types::{Value, ValueType};

/// Recursively flattens a parsed JSON document into `(path, type) -> value`
/// pairs. Object keys contribute `/<key>`, array elements `/<index>`; the
/// root path is the empty string. Duplicate `(path, type)` pairs within one
/// document (only reachable through structural collision, since JSON maps
/// have unique keys) resolve last-write-wins over the traversal order.
pub fn flatten(root: &Json) -> HashMap<(String, ValueType), Value> {
    let mut acc = HashMap::new();
    flatten_with_prefix(&mut acc, String::new(), root);
    acc
}

fn flatten_with_prefix(acc: &mut HashMap<(String, ValueType), Value>, prefix: String, node: &Json) {
    match node {
        Json::Object(map) => {
            for (key, child) in map {
                flatten_with_prefix(acc, format!("{prefix}/{key}"), child);
            }
        }
        Json::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                flatten_with_prefix(acc, format!("{prefix}/{idx}"), child);
            }
        }
        Json::String(s) => {
            acc.insert((prefix, ValueType::Str), Value::Str(s.clone()));
        }
        Json::Number(n) => {
            // JSON numbers are all doubles; a number with no lossless f64
            // representation (shouldn't occur from `serde_json` parsing of
            // valid JSON) falls back to Null rather than panicking.
            let value = n.as_f64().map(Value::Float).unwrap_or(Value::Null);
            acc.insert((prefix, value.value_type()), value);
        }
        // Explicit null, booleans: both fall through to Null.
        Json::Null | Json::Bool(_) => {
            acc.insert((prefix, ValueType::Null), Value::Null);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_nested_object_and_array() {
        let doc = json!({
            "age": 23,
            "social": {"twitter": "https://twitter.com"},
            "arr": [2, 3],
            "flag": null,
        });
        let flat = flatten(&doc);
        assert_eq!(flat[&("/age".to_string(), ValueType::Float)], Value::Float(23.0));
        assert_eq!(
            flat[&("/social/twitter".to_string(), ValueType::Str)],
            Value::Str("https://twitter.com".to_string())
        );
        assert_eq!(flat[&("/arr/0".to_string(), ValueType::Float)], Value::Float(2.0));
        assert_eq!(flat[&("/arr/1".to_string(), ValueType::Float)], Value::Float(3.0));
        assert_eq!(flat[&("/flag".to_string(), ValueType::Null)], Value::Null);
    }

    #[test]
    fn boolean_flattens_to_null() {
        let doc = json!({"active": true});
        let flat = flatten(&doc);
        assert_eq!(flat[&("/active".to_string(), ValueType::Null)], Value::Null);
    }

    #[test]
    fn top_level_scalar_keys_on_empty_path() {
        let doc = json!(42);
        let flat = flatten(&doc);
        assert_eq!(flat[&(String::new(), ValueType::Float)], Value::Float(42.0));
    }
}
