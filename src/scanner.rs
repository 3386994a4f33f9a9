//! Enumerating the source files handed to the extractor.
//!
//! Includes select which directories under the source root are walked;
//! ignores and the built-in test-file patterns exclude paths inside
//! them. A pattern containing `*` or `?` is a glob, anything else is a
//! literal path relative to the root. Problems (bad patterns, missing
//! include paths, unreadable directories) become warnings on the result
//! and surface in the report like any other warning.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

/// Supported source file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Js,
    Jsx,
    Ts,
    Tsx,
    Vue,
    Py,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("js") => Some(Self::Js),
            Some("jsx") => Some(Self::Jsx),
            Some("ts") => Some(Self::Ts),
            Some("tsx") => Some(Self::Tsx),
            Some("vue") => Some(Self::Vue),
            Some("py") => Some(Self::Py),
            _ => None,
        }
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Exclusion rules compiled once per scan: literal subtree roots and
/// glob patterns, with the test-file patterns folded in when enabled.
struct Exclusions {
    literal_roots: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl Exclusions {
    fn compile(
        base_dir: &Path,
        ignores: &[String],
        ignore_test_files: bool,
        warnings: &mut Vec<String>,
    ) -> Self {
        let mut literal_roots = Vec::new();
        let mut globs = Vec::new();

        for raw in ignores {
            if !is_glob(raw) {
                literal_roots.push(base_dir.join(raw));
                continue;
            }
            match Pattern::new(raw) {
                Ok(pattern) => globs.push(pattern),
                Err(e) => {
                    warnings.push(format!("Skipping invalid ignore pattern '{}': {}", raw, e));
                }
            }
        }

        if ignore_test_files {
            // Built-in patterns are known-good globs.
            globs.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self {
            literal_roots,
            globs,
        }
    }

    fn excludes(&self, path: &Path) -> bool {
        if self.literal_roots.iter().any(|root| path.starts_with(root)) {
            return true;
        }
        let text = path.to_string_lossy();
        self.globs.iter().any(|pattern| pattern.matches(&text))
    }
}

/// Resolve the include list to the directories to walk. An empty list
/// means the whole source root.
fn scan_roots(base_dir: &Path, includes: &[String], warnings: &mut Vec<String>) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut roots = Vec::new();
    for raw in includes {
        if !is_glob(raw) {
            let path = base_dir.join(raw);
            if path.exists() {
                roots.push(path);
            } else {
                warnings.push(format!("Include path does not exist: {}", path.display()));
            }
            continue;
        }

        let expanded = base_dir.join(raw);
        match glob(&expanded.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|p| p.is_dir())),
            Err(e) => {
                warnings.push(format!("Skipping invalid include pattern '{}': {}", raw, e));
            }
        }
    }
    roots
}

/// Result of enumerating one source tree.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Matching file paths, sorted.
    pub files: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignores: &[String],
    ignore_test_files: bool,
) -> ScanResult {
    let mut warnings = Vec::new();
    let exclusions = Exclusions::compile(base_dir, ignores, ignore_test_files, &mut warnings);

    let mut files = BTreeSet::new();
    for root in scan_roots(base_dir, includes, &mut warnings) {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warnings.push(format!("Cannot access path: {}", e));
                    continue;
                }
            };

            let path = entry.path();
            if exclusions.excludes(path) {
                continue;
            }
            if entry.file_type().is_file() && SourceKind::from_path(path).is_some() {
                files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    use super::*;

    /// Lay out empty files under a tempdir, creating parents as needed.
    fn tree(paths: &[&str]) -> TempDir {
        let dir = tempdir().unwrap();
        for p in paths {
            let path = dir.path().join(p);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, "").unwrap();
        }
        dir
    }

    fn scan(base: &Path, includes: &[&str], ignores: &[&str], skip_tests: bool) -> ScanResult {
        let includes: Vec<String> = includes.iter().map(|s| s.to_string()).collect();
        let ignores: Vec<String> = ignores.iter().map(|s| s.to_string()).collect();
        scan_files(base, &includes, &ignores, skip_tests)
    }

    /// File names only, in result order.
    fn names(result: &ScanResult) -> Vec<&str> {
        result
            .files
            .iter()
            .map(|f| f.rsplit('/').next().unwrap())
            .collect()
    }

    #[test]
    fn test_source_kind_from_path() {
        assert_eq!(SourceKind::from_path(Path::new("a.tsx")), Some(SourceKind::Tsx));
        assert_eq!(SourceKind::from_path(Path::new("a.ts")), Some(SourceKind::Ts));
        assert_eq!(SourceKind::from_path(Path::new("a.jsx")), Some(SourceKind::Jsx));
        assert_eq!(SourceKind::from_path(Path::new("a.js")), Some(SourceKind::Js));
        assert_eq!(SourceKind::from_path(Path::new("Menu.vue")), Some(SourceKind::Vue));
        assert_eq!(SourceKind::from_path(Path::new("views.py")), Some(SourceKind::Py));
        assert_eq!(SourceKind::from_path(Path::new("en.json")), None);
        assert_eq!(SourceKind::from_path(Path::new("styles.css")), None);
        assert_eq!(SourceKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_only_supported_kinds_collected() {
        let dir = tree(&["Header.tsx", "views.py", "en.json", "theme.css"]);
        let result = scan(dir.path(), &[], &[], false);

        assert_eq!(names(&result), vec!["Header.tsx", "views.py"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_files_come_back_sorted() {
        let dir = tree(&["c.tsx", "a.tsx", "b.py"]);
        let result = scan(dir.path(), &[], &[], false);

        assert_eq!(names(&result), vec!["a.tsx", "b.py", "c.tsx"]);
    }

    #[test]
    fn test_walk_recurses_into_subdirectories() {
        let dir = tree(&["pages/Home.tsx", "api/views.py", "root.ts"]);
        let result = scan(dir.path(), &[], &[], false);

        assert_eq!(result.files.len(), 3);
    }

    #[test]
    fn test_glob_ignore_excludes_matches_anywhere() {
        let dir = tree(&["Header.tsx", "vendor/i18n/runtime.js", "pages/vendor/shim.ts"]);
        let result = scan(dir.path(), &[], &["**/vendor/**"], false);

        assert_eq!(names(&result), vec!["Header.tsx"]);
    }

    #[test]
    fn test_literal_ignore_excludes_whole_subtree() {
        let dir = tree(&["pages/Home.tsx", "generated/api.ts", "generated/deep/types.ts"]);
        let result = scan(dir.path(), &[], &["generated"], false);

        assert_eq!(names(&result), vec!["Home.tsx"]);
    }

    #[test]
    fn test_includes_restrict_walked_roots() {
        let dir = tree(&["app/Home.tsx", "scripts/migrate.py"]);
        let result = scan(dir.path(), &["app"], &[], false);

        assert_eq!(names(&result), vec!["Home.tsx"]);
    }

    #[test]
    fn test_include_glob_expands_to_directories() {
        let dir = tree(&["packages/web/App.tsx", "packages/api/views.py", "tools/gen.ts"]);
        let result = scan(dir.path(), &["packages/*"], &[], false);

        assert_eq!(result.files.len(), 2);
        assert!(!result.files.iter().any(|f| f.ends_with("gen.ts")));
    }

    #[test]
    fn test_missing_include_path_is_a_warning() {
        let dir = tree(&["Home.tsx"]);
        let result = scan(dir.path(), &["no-such-dir"], &[], false);

        assert!(result.files.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("no-such-dir"));
    }

    #[test]
    fn test_invalid_ignore_pattern_is_a_warning() {
        let dir = tree(&["Home.tsx"]);
        let result = scan(dir.path(), &[], &["[broken"], false);

        // The bad pattern is dropped, the scan still runs
        assert_eq!(names(&result), vec!["Home.tsx"]);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("[broken"));
    }

    #[test]
    fn test_test_fixtures_excluded_when_enabled() {
        let dir = tree(&[
            "Home.tsx",
            "Home.test.tsx",
            "test_views.py",
            "__tests__/helpers.ts",
        ]);
        let result = scan(dir.path(), &[], &[], true);

        assert_eq!(names(&result), vec!["Home.tsx"]);
    }

    #[test]
    fn test_test_fixtures_kept_when_disabled() {
        let dir = tree(&["Home.tsx", "Home.test.tsx"]);
        let result = scan(dir.path(), &[], &[], false);

        assert_eq!(result.files.len(), 2);
    }
}
