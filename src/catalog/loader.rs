//! Loading translation catalog files from a locales directory.
//!
//! Each `<language>.json` file in the catalogs directory is parsed and
//! flattened. A missing or invalid directory is a fatal configuration
//! error; a file that fails to parse only costs that language's data
//! and is recorded as a warning.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use super::{LanguageCatalog, flatten};

/// Result of scanning a catalogs directory.
#[derive(Debug, Default)]
pub struct ScanCatalogsResult {
    pub catalogs: HashMap<String, LanguageCatalog>,
    pub warnings: Vec<String>,
}

/// Extracts the language code from a catalog filename.
///
/// Examples:
/// - "en.json" -> Some("en")
/// - "zh-CN.json" -> Some("zh-CN")
pub fn extract_language(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

pub fn parse_catalog_file(path: &Path, namespace: Option<&str>) -> Result<LanguageCatalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

    let doc: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {:?}", path))?;

    let language = extract_language(path).unwrap_or_default();
    let mut catalog = LanguageCatalog::new(language, path.to_string_lossy());
    catalog.entries = flatten(&doc, "", namespace);
    Ok(catalog)
}

pub fn scan_catalog_files(
    catalogs_dir: impl AsRef<Path>,
    namespace: Option<&str>,
) -> Result<ScanCatalogsResult> {
    let catalogs_dir = catalogs_dir.as_ref();
    let mut result = ScanCatalogsResult::default();

    if !catalogs_dir.exists() {
        bail!(
            "Catalogs directory '{}' does not exist.\n\
             Hint: Check your .keyscoperc.json 'catalogsRoot' setting.",
            catalogs_dir.display()
        );
    }

    if !catalogs_dir.is_dir() {
        bail!("'{}' is not a directory.", catalogs_dir.display());
    }

    for entry in fs::read_dir(catalogs_dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) == Some("json")
            && let Some(language) = extract_language(&path)
        {
            match parse_catalog_file(&path, namespace) {
                Ok(catalog) => {
                    result.catalogs.insert(language, catalog);
                }
                Err(e) => {
                    result
                        .warnings
                        .push(format!("Failed to parse {:?}: {}", path, e));
                }
            }
        }
    }

    Ok(result)
}
