//! Extraction pattern compilation and defaults.
//!
//! Every pattern is a regular expression with exactly one capture group:
//! the key text (for static patterns) or the literal key prefix (for
//! dynamic patterns). Patterns are applied in the order they are
//! configured, each scanning the whole file independently.

use anyhow::{Context, Result, bail};
use regex::Regex;

/// A compiled single-capture-group extraction pattern.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    pub raw: String,
    pub regex: Regex,
}

impl KeyPattern {
    /// Compile a pattern, enforcing the single-capture-group contract.
    pub fn compile(raw: &str) -> Result<Self> {
        let regex =
            Regex::new(raw).with_context(|| format!("Invalid extraction pattern: \"{}\"", raw))?;

        // captures_len() counts the implicit whole-match group as well.
        if regex.captures_len() != 2 {
            bail!(
                "Extraction pattern \"{}\" must have exactly one capture group, found {}",
                raw,
                regex.captures_len() - 1
            );
        }

        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }
}

/// Ordered static and dynamic patterns for one extraction run.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub static_patterns: Vec<KeyPattern>,
    pub dynamic_patterns: Vec<KeyPattern>,
}

impl PatternSet {
    pub fn compile(static_raw: &[String], dynamic_raw: &[String]) -> Result<Self> {
        let static_patterns = static_raw
            .iter()
            .map(|p| KeyPattern::compile(p))
            .collect::<Result<Vec<_>>>()?;
        let dynamic_patterns = dynamic_raw
            .iter()
            .map(|p| KeyPattern::compile(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            static_patterns,
            dynamic_patterns,
        })
    }

    pub fn defaults() -> Self {
        Self::compile(&default_static_patterns(), &default_dynamic_patterns())
            .expect("default patterns must compile")
    }
}

/// Static patterns for common literal-key call shapes.
///
/// Covers `t('key')`, `$t('key')`, `i18n.t('key')`, `translate('key')`,
/// `useTranslation('ns')`, `formatMessage({id: 'key'})` and the
/// gettext-style `_('key')` / `gettext('key')` used by Python backends.
pub fn default_static_patterns() -> Vec<String> {
    [
        r#"(?:\$t|i18n\.t|\btranslate|\bt)\(\s*['"]([^'"]+)['"]\s*[,)]"#,
        r#"\buseTranslation\(\s*['"]([^'"]+)['"]"#,
        r#"\bformatMessage\(\s*\{\s*id\s*:\s*['"]([^'"]+)['"]"#,
        r#"(?:\b_|\bgettext)\(\s*['"]([^'"]+)['"]\s*[,)]"#,
    ]
    .map(String::from)
    .to_vec()
}

/// Dynamic patterns for key references that cannot be fully resolved:
/// template interpolation and string concatenation. The capture group is
/// the literal prefix before the dynamic part.
pub fn default_dynamic_patterns() -> Vec<String> {
    [
        r#"\bt\(\s*`([^`$]*)\$\{"#,
        r#"\bt\(\s*['"]([^'"]+)['"]\s*\+"#,
    ]
    .map(String::from)
    .to_vec()
}
