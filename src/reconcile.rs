//! Reconciling used translation keys against a catalog's available keys.
//!
//! Produces the unused and missing key lists, plus the reverse
//! "which files reference key K" lookup.

use std::collections::HashSet;

use crate::extract::UsedKeySet;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Available keys no source file references, sorted.
    pub unused: Vec<String>,
    /// Non-dynamic referenced keys absent from the catalog, sorted.
    pub missing: Vec<String>,
}

/// A key counts as used if it is an exact member of the used set, or if
/// some dynamic entry's wildcard prefix is a string-prefix of it.
fn is_used(key: &str, exact: &HashSet<&str>, dynamic_prefixes: &HashSet<&str>) -> bool {
    exact.contains(key) || dynamic_prefixes.iter().any(|p| key.starts_with(p))
}

/// Compute unused and missing keys.
///
/// Dynamic (wildcard) entries can claim available keys as used, but are
/// excluded from missing-key detection: a wildcard cannot be validated
/// against a concrete literal.
pub fn reconcile(used: &UsedKeySet, available: &HashSet<String>) -> Reconciliation {
    let exact = used.static_keys();
    let dynamic_prefixes = used.dynamic_prefixes();

    let mut unused: Vec<String> = available
        .iter()
        .filter(|key| !is_used(key.as_str(), &exact, &dynamic_prefixes))
        .cloned()
        .collect();
    unused.sort();

    let mut missing: Vec<String> = exact
        .iter()
        .filter(|key| !available.contains(**key))
        .map(|key| key.to_string())
        .collect();
    missing.sort();

    Reconciliation { unused, missing }
}

/// Files whose key set contains an exact match of `search_key`, or a
/// dynamic entry whose prefix `search_key` starts with. Sorted by path.
pub fn find_key_usage(used: &UsedKeySet, search_key: &str) -> Vec<String> {
    let mut files: Vec<String> = used
        .by_file
        .iter()
        .filter(|(_, keys)| {
            keys.iter().any(|k| {
                if k.is_dynamic {
                    search_key.starts_with(k.prefix())
                } else {
                    k.key == search_key
                }
            })
        })
        .map(|(path, _)| path.clone())
        .collect();
    files.sort();
    files
}
