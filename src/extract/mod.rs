//! Source key extraction: scanning source file contents with the
//! configured pattern sets to produce the set of referenced translation
//! keys, with per-file membership retained for reverse lookups.

pub mod patterns;

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use rayon::prelude::*;

use self::patterns::PatternSet;

/// Wildcard marker appended to the literal prefix of a dynamic key.
pub const WILDCARD: char = '*';

/// One translation key referenced from source code.
///
/// Dynamic keys originate from templates or concatenation; their `key`
/// is the literal prefix plus a trailing [`WILDCARD`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsedKey {
    pub key: String,
    pub is_dynamic: bool,
}

impl UsedKey {
    pub fn literal(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_dynamic: false,
        }
    }

    pub fn dynamic(prefix: impl Into<String>) -> Self {
        Self {
            key: format!("{}{}", prefix.into(), WILDCARD),
            is_dynamic: true,
        }
    }

    /// The literal prefix of a dynamic key (the key without its wildcard
    /// marker). For static keys this is the full key.
    pub fn prefix(&self) -> &str {
        if self.is_dynamic {
            self.key.strip_suffix(WILDCARD).unwrap_or(&self.key)
        } else {
            &self.key
        }
    }
}

/// All keys referenced across the scanned sources, indexed by file path.
#[derive(Debug, Default, Clone)]
pub struct UsedKeySet {
    pub by_file: HashMap<String, HashSet<UsedKey>>,
}

impl UsedKeySet {
    /// Every distinct key across all files.
    pub fn all_keys(&self) -> HashSet<&UsedKey> {
        self.by_file.values().flatten().collect()
    }

    /// Exact (non-dynamic) key texts.
    pub fn static_keys(&self) -> HashSet<&str> {
        self.by_file
            .values()
            .flatten()
            .filter(|k| !k.is_dynamic)
            .map(|k| k.key.as_str())
            .collect()
    }

    /// Literal prefixes of all dynamic keys.
    pub fn dynamic_prefixes(&self) -> HashSet<&str> {
        self.by_file
            .values()
            .flatten()
            .filter(|k| k.is_dynamic)
            .map(|k| k.prefix())
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.by_file.len()
    }
}

/// A source file snapshot handed to the extractor.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

/// Extract all referenced keys from one file's content.
///
/// Every pattern scans the entire content independently, collecting all
/// non-overlapping matches. A fresh match iterator is created per
/// (content, pattern) pair, so no match-position state is shared across
/// files or patterns. Captures are trimmed; empty captures are dropped.
/// Deduplication is by set membership, so pattern order does not affect
/// the result.
pub fn extract_keys(content: &str, patterns: &PatternSet) -> HashSet<UsedKey> {
    let mut keys = HashSet::new();

    for pattern in &patterns.static_patterns {
        for caps in pattern.regex.captures_iter(content) {
            if let Some(m) = caps.get(1) {
                let key = m.as_str().trim();
                if !key.is_empty() {
                    keys.insert(UsedKey::literal(key));
                }
            }
        }
    }

    for pattern in &patterns.dynamic_patterns {
        for caps in pattern.regex.captures_iter(content) {
            if let Some(m) = caps.get(1) {
                let prefix = m.as_str().trim();
                if !prefix.is_empty() {
                    keys.insert(UsedKey::dynamic(prefix));
                }
            }
        }
    }

    keys
}

/// Run extraction over all files in parallel.
///
/// Each file accumulates into a local key set; the per-file sets are
/// merged in a single-threaded collect, so the result does not depend on
/// file-processing order.
pub fn scan_sources(files: &[SourceFile], patterns: &PatternSet) -> UsedKeySet {
    let by_file: HashMap<String, HashSet<UsedKey>> = files
        .par_iter()
        .map(|file| (file.path.clone(), extract_keys(&file.content, patterns)))
        .collect();

    UsedKeySet { by_file }
}

/// Result of reading source files from disk.
#[derive(Debug, Default)]
pub struct ReadSourcesResult {
    pub files: Vec<SourceFile>,
    pub warnings: Vec<String>,
}

/// Read source file contents in parallel.
///
/// Unreadable files are recorded as warnings and excluded; they never
/// abort the run.
pub fn read_source_files(paths: &[String]) -> ReadSourcesResult {
    let outcomes: Vec<Result<SourceFile, String>> = paths
        .par_iter()
        .map(|path| match fs::read_to_string(Path::new(path)) {
            Ok(content) => Ok(SourceFile {
                path: path.clone(),
                content,
            }),
            Err(e) => Err(format!("Failed to read {}: {}", path, e)),
        })
        .collect();

    let mut result = ReadSourcesResult::default();
    for outcome in outcomes {
        match outcome {
            Ok(file) => result.files.push(file),
            Err(warning) => result.warnings.push(warning),
        }
    }
    // Deterministic order regardless of read scheduling
    result.files.sort_by(|a, b| a.path.cmp(&b.path));
    result
}
