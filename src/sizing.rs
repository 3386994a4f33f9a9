//! Cross-language size statistics and baseline-relative deviations.
//!
//! The baseline language is the first entry in the caller-supplied
//! ordered language list, never an alphabetic or source-language
//! default. All percentage comparisons are directional relative to it.
//!
//! One threshold number serves two purposes here, matching the observed
//! behavior of runtime i18n audits: it is an absolute character cut for
//! counting long values, and a percentage cut for deviation comparisons.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::catalog::LanguageCatalog;

/// Per-language size statistics over flattened leaf values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStats {
    pub total_keys: usize,
    pub total_characters: usize,
    pub average_key_length: f64,
    pub max_key_length: usize,
    pub min_key_length: usize,
    pub empty_keys: usize,
    /// Values longer than the threshold, as an absolute character count.
    pub long_keys: usize,
}

/// Size deviation of one language relative to the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeVariation {
    pub language: String,
    pub character_difference: i64,
    pub percentage_difference: f64,
    pub is_problematic: bool,
}

/// A baseline key whose translation deviates beyond the threshold in at
/// least one other language.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblematicKey {
    pub key: String,
    pub variations: Vec<SizeVariation>,
}

/// Full sizing analysis output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingAnalysis {
    /// Languages in the caller-supplied order; the first is the baseline.
    pub languages: Vec<String>,
    pub language_stats: BTreeMap<String, LanguageStats>,
    pub size_variations: Vec<SizeVariation>,
    pub problematic_keys: Vec<ProblematicKey>,
    pub recommendations: Vec<String>,
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Percentage difference of `chars` relative to `baseline_chars`, guarded
/// to 0 when the baseline is empty (never NaN or infinite).
fn percent_diff(chars: usize, baseline_chars: usize) -> f64 {
    if baseline_chars == 0 {
        return 0.0;
    }
    (chars as f64 - baseline_chars as f64) / baseline_chars as f64 * 100.0
}

fn compute_stats(catalog: &LanguageCatalog, threshold: f64) -> LanguageStats {
    let lengths: Vec<usize> = catalog.entries.iter().map(|e| char_len(&e.value)).collect();

    let total_keys = lengths.len();
    let total_characters: usize = lengths.iter().sum();
    let average_key_length = if total_keys == 0 {
        0.0
    } else {
        total_characters as f64 / total_keys as f64
    };

    LanguageStats {
        total_keys,
        total_characters,
        average_key_length,
        max_key_length: lengths.iter().copied().max().unwrap_or(0),
        min_key_length: lengths.iter().copied().min().unwrap_or(0),
        empty_keys: lengths.iter().filter(|&&l| l == 0).count(),
        long_keys: lengths.iter().filter(|&&l| l as f64 > threshold).count(),
    }
}

/// Analyze all language catalogs against the baseline.
///
/// A language listed but without a parsed catalog is treated as empty,
/// so partial data never aborts the analysis. Single pass, pure, and
/// idempotent for identical inputs.
pub fn analyze(
    catalogs: &HashMap<String, LanguageCatalog>,
    languages: &[String],
    threshold: f64,
) -> SizingAnalysis {
    let empty = LanguageCatalog::default();
    let catalog_for = |lang: &str| catalogs.get(lang).unwrap_or(&empty);

    let language_stats: BTreeMap<String, LanguageStats> = languages
        .iter()
        .map(|lang| (lang.clone(), compute_stats(catalog_for(lang), threshold)))
        .collect();

    let Some(baseline) = languages.first() else {
        return SizingAnalysis::default();
    };
    let baseline_chars = language_stats[baseline].total_characters;

    let size_variations: Vec<SizeVariation> = languages
        .iter()
        .skip(1)
        .map(|lang| {
            let chars = language_stats[lang].total_characters;
            let percentage_difference = percent_diff(chars, baseline_chars);
            SizeVariation {
                language: lang.clone(),
                character_difference: chars as i64 - baseline_chars as i64,
                percentage_difference,
                is_problematic: percentage_difference.abs() > threshold,
            }
        })
        .collect();

    let problematic_keys = find_problematic_keys(catalogs, languages, threshold);

    let recommendations = build_recommendations(
        baseline,
        &language_stats,
        &size_variations,
        &problematic_keys,
        threshold,
    );

    SizingAnalysis {
        languages: languages.to_vec(),
        language_stats,
        size_variations,
        problematic_keys,
        recommendations,
    }
}

/// Per-key deviation check: every baseline key is compared against every
/// other language that also has the key.
fn find_problematic_keys(
    catalogs: &HashMap<String, LanguageCatalog>,
    languages: &[String],
    threshold: f64,
) -> Vec<ProblematicKey> {
    let Some(baseline) = languages.first() else {
        return Vec::new();
    };
    let Some(baseline_catalog) = catalogs.get(baseline) else {
        return Vec::new();
    };

    let value_maps: HashMap<&str, HashMap<&str, &str>> = languages
        .iter()
        .skip(1)
        .filter_map(|lang| {
            catalogs
                .get(lang)
                .map(|c| (lang.as_str(), c.value_map()))
        })
        .collect();

    let mut baseline_entries: Vec<_> = baseline_catalog.entries.iter().collect();
    baseline_entries.sort_by(|a, b| a.key.cmp(&b.key));

    let mut problematic = Vec::new();
    for entry in baseline_entries {
        let base_len = char_len(&entry.value);

        let variations: Vec<SizeVariation> = languages
            .iter()
            .skip(1)
            .filter_map(|lang| {
                let value = value_maps.get(lang.as_str())?.get(entry.key.as_str())?;
                let len = char_len(value);
                let percentage_difference = percent_diff(len, base_len);
                if percentage_difference.abs() > threshold {
                    Some(SizeVariation {
                        language: lang.clone(),
                        character_difference: len as i64 - base_len as i64,
                        percentage_difference,
                        is_problematic: true,
                    })
                } else {
                    None
                }
            })
            .collect();

        if !variations.is_empty() {
            problematic.push(ProblematicKey {
                key: entry.key.clone(),
                variations,
            });
        }
    }

    problematic
}

/// Deterministic recommendation strings derived purely from the computed
/// stats: one per problematic language (direction-aware), one aggregate
/// line when any key is problematic, and one per language with long
/// values.
fn build_recommendations(
    baseline: &str,
    language_stats: &BTreeMap<String, LanguageStats>,
    size_variations: &[SizeVariation],
    problematic_keys: &[ProblematicKey],
    threshold: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    for variation in size_variations.iter().filter(|v| v.is_problematic) {
        if variation.percentage_difference > 0.0 {
            recommendations.push(format!(
                "'{}' translations are {:.1}% longer than '{}'; review layouts sized for '{}' text",
                variation.language, variation.percentage_difference, baseline, baseline
            ));
        } else {
            recommendations.push(format!(
                "'{}' translations are {:.1}% shorter than '{}'; check for untranslated or truncated entries",
                variation.language,
                variation.percentage_difference.abs(),
                baseline
            ));
        }
    }

    if !problematic_keys.is_empty() {
        recommendations.push(format!(
            "{} key(s) deviate more than {}% from '{}' in at least one language",
            problematic_keys.len(),
            threshold,
            baseline
        ));
    }

    for (language, stats) in language_stats {
        if stats.long_keys > 0 {
            recommendations.push(format!(
                "'{}' has {} value(s) longer than {} characters; consider shortening them",
                language, stats.long_keys, threshold
            ));
        }
    }

    recommendations
}
