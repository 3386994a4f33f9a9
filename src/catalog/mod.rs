//! Translation catalog handling: flattening nested documents into
//! dot-qualified key/value pairs and loading per-language catalog files.

pub mod loader;

use std::collections::HashMap;

use serde_json::Value;

/// A single (dot-path key, leaf value) pair derived from a nested
/// translation document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub key: String,
    pub value: String,
}

/// Flattened catalog for one language.
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    pub language: String,
    pub file_path: String,
    pub entries: Vec<FlatEntry>,
}

impl LanguageCatalog {
    pub fn new(language: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            file_path: file_path.into(),
            entries: Vec::new(),
        }
    }

    /// Key -> value lookup over the flattened entries.
    pub fn value_map(&self) -> HashMap<&str, &str> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str()))
            .collect()
    }
}

/// Flatten a nested translation document into dot-qualified entries.
///
/// Objects recurse with `prefix.key`; every other value (string, number,
/// bool, null, array) is an atomic leaf. Arrays are never recursed into.
/// Non-string leaves are stringified best-effort, so this never fails.
///
/// When `namespace` is set, each leaf is additionally emitted under
/// `namespace:key` with the same value, for runtimes that resolve
/// namespace-qualified lookups. The namespace lives in the key text
/// rather than as a field on [`FlatEntry`]; downstream consumers treat
/// both addressing forms as plain keys.
pub fn flatten(doc: &Value, prefix: &str, namespace: Option<&str>) -> Vec<FlatEntry> {
    let mut entries = Vec::new();
    flatten_into(doc, prefix, &mut entries);

    if let Some(ns) = namespace {
        let qualified: Vec<FlatEntry> = entries
            .iter()
            .map(|e| FlatEntry {
                key: format!("{}:{}", ns, e.key),
                value: e.value.clone(),
            })
            .collect();
        entries.extend(qualified);
    }

    entries
}

fn flatten_into(value: &Value, prefix: &str, out: &mut Vec<FlatEntry>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(val, &full_key, out);
            }
        }
        leaf => {
            // The document root can itself be a leaf; it has no key path.
            if prefix.is_empty() {
                return;
            }
            out.push(FlatEntry {
                key: prefix.to_string(),
                value: leaf_to_string(leaf),
            });
        }
    }
}

fn leaf_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn keys(entries: &[FlatEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_flatten_simple() {
        let doc = json!({"common": {"save": "Save", "cancel": "Cancel"}});
        let entries = flatten(&doc, "", None);

        assert_eq!(keys(&entries), vec!["common.save", "common.cancel"]);
        assert_eq!(entries[0].value, "Save");
    }

    #[test]
    fn test_flatten_deeply_nested() {
        let doc = json!({"auth": {"login": {"title": "Login", "button": "Submit"}}});
        let entries = flatten(&doc, "", None);

        assert_eq!(keys(&entries), vec!["auth.login.title", "auth.login.button"]);
    }

    #[test]
    fn test_flatten_with_prefix() {
        let doc = json!({"hello": "Hi"});
        let entries = flatten(&doc, "common", None);

        assert_eq!(keys(&entries), vec!["common.hello"]);
    }

    #[test]
    fn test_flatten_count_matches_leaf_count() {
        // 4 leaves across mixed nesting levels
        let doc = json!({
            "a": "1",
            "b": {"c": "2", "d": {"e": "3"}},
            "f": "4"
        });
        let entries = flatten(&doc, "", None);
        assert_eq!(entries.len(), 4);

        // Each key identifies exactly one leaf
        let unique: std::collections::HashSet<_> = entries.iter().map(|e| &e.key).collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_flatten_arrays_are_atomic() {
        let doc = json!({"items": ["a", "b"], "nested": {"list": [1, 2]}});
        let entries = flatten(&doc, "", None);

        assert_eq!(keys(&entries), vec!["items", "nested.list"]);
        assert_eq!(entries[0].value, r#"["a","b"]"#);
        assert_eq!(entries[1].value, "[1,2]");
    }

    #[test]
    fn test_flatten_coerces_non_string_leaves() {
        let doc = json!({"count": 42, "flag": true, "nothing": null});
        let entries = flatten(&doc, "", None);

        assert_eq!(entries[0].value, "42");
        assert_eq!(entries[1].value, "true");
        assert_eq!(entries[2].value, "null");
    }

    #[test]
    fn test_flatten_with_namespace_doubles_entries() {
        let doc = json!({"common": {"hello": "Hi"}});
        let entries = flatten(&doc, "", Some("app"));

        assert_eq!(keys(&entries), vec!["common.hello", "app:common.hello"]);
        assert_eq!(entries[0].value, entries[1].value);
    }

    #[test]
    fn test_flatten_empty_object() {
        let doc = json!({});
        assert!(flatten(&doc, "", None).is_empty());
    }

    #[test]
    fn test_flatten_root_leaf_is_ignored() {
        // A bare string has no key path to address it by.
        let doc = json!("just a string");
        assert!(flatten(&doc, "", None).is_empty());
    }

    #[test]
    fn test_value_map() {
        let mut catalog = LanguageCatalog::new("en", "en.json");
        catalog.entries = flatten(&json!({"a": "1", "b": "2"}), "", None);

        let map = catalog.value_map();
        assert_eq!(map.get("a"), Some(&"1"));
        assert_eq!(map.get("b"), Some(&"2"));
    }
}
