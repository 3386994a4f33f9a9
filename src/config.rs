use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::extract::patterns::{KeyPattern, default_dynamic_patterns, default_static_patterns};

pub const CONFIG_FILE_NAME: &str = ".keyscoperc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
    "**/test_*.py",
    "**/*_test.py",
];

/// Output format selector, used only by presentation, never by analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_catalogs_root", alias = "localesDir")]
    pub catalogs_root: String,
    /// Language whose catalog the used keys are reconciled against.
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// Ordered language codes; the first is the sizing baseline.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Optional namespace; each catalog entry is dual-addressed as
    /// `namespace:key` when set.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Single-capture-group regexes for literal key references, applied
    /// in order.
    #[serde(default = "default_static_patterns")]
    pub static_patterns: Vec<String>,
    /// Single-capture-group regexes whose capture is a literal key
    /// prefix (templates, concatenation).
    #[serde(default = "default_dynamic_patterns")]
    pub dynamic_patterns: Vec<String>,
    /// Absolute character cut for long values; the same number is the
    /// percentage cut for cross-language deviation comparisons.
    #[serde(default = "default_length_threshold")]
    pub length_threshold: f64,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_catalogs_root() -> String {
    "./locales".to_string()
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_length_threshold() -> f64 {
    50.0
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: Vec::new(),
            source_root: default_source_root(),
            catalogs_root: default_catalogs_root(),
            source_language: default_source_language(),
            languages: default_languages(),
            namespace: None,
            static_patterns: default_static_patterns(),
            dynamic_patterns: default_dynamic_patterns(),
            length_threshold: default_length_threshold(),
            output_format: OutputFormat::default(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Checks glob patterns, compiles every extraction pattern (each must
    /// have exactly one capture group), and sanity-checks the language
    /// list and threshold.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        for pattern in self.static_patterns.iter().chain(&self.dynamic_patterns) {
            KeyPattern::compile(pattern)?;
        }

        if self.languages.is_empty() {
            bail!("'languages' must list at least one language code.");
        }

        if !self.length_threshold.is_finite() || self.length_threshold <= 0.0 {
            bail!(
                "'lengthThreshold' must be a positive number, got {}",
                self.length_threshold
            );
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::config::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignores.is_empty());
        assert_eq!(config.source_language, "en");
        assert_eq!(config.languages, vec!["en"]);
        assert_eq!(config.length_threshold, 50.0);
        assert!(!config.static_patterns.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "ignores": ["**/dist/**"],
              "languages": ["en", "de", "ja"],
              "sourceLanguage": "en",
              "lengthThreshold": 30
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ignores, vec!["**/dist/**"]);
        assert_eq!(config.languages, vec!["en", "de", "ja"]);
        assert_eq!(config.length_threshold, 30.0);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "languages": ["fr"] }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.languages, vec!["fr"]);
        assert_eq!(config.static_patterns, default_static_patterns());
        assert_eq!(config.catalogs_root, "./locales");
    }

    #[test]
    fn test_output_format_parsing() {
        let json = r#"{ "outputFormat": "csv" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.output_format, OutputFormat::Csv);
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("components");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "ignores": ["**/test/**"] }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.ignores, vec!["**/test/**"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.languages, vec!["en"]);
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()], // unclosed bracket
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_invalid_extraction_pattern() {
        let config = Config {
            static_patterns: vec![r"t\((unclosed".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_pattern_without_capture_group() {
        let config = Config {
            static_patterns: vec![r"t\('[^']+'\)".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("exactly one capture group")
        );
    }

    #[test]
    fn test_validate_empty_languages() {
        let config = Config {
            languages: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_positive_threshold() {
        let config = Config {
            length_threshold: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "ignores": ["[invalid"] }"#).unwrap();

        let result = load_config(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_backward_compatibility_locales_dir() {
        let json = r#"{ "localesDir": "./messages" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.catalogs_root, "./messages");
    }

    #[test]
    fn test_serialization_uses_new_names() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("catalogsRoot"));
        assert!(!json.contains("localesDir"));
    }

    #[test]
    fn test_default_config_json_round_trips() {
        let json = default_config_json().unwrap();
        let config: Config = serde_json::from_str(&json).unwrap();
        assert!(config.validate().is_ok());
    }
}
