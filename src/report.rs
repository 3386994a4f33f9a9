//! Assembling one analysis run into a single result object.
//!
//! The report is a language-agnostic, immutable snapshot of everything
//! the engine computed: used keys, reconciliation, sizing, and the
//! warnings accumulated along the way. Rendering (table, JSON, CSV) is
//! layered on top in `reporter` and never feeds back into analysis.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
    catalog::LanguageCatalog,
    extract::{self, SourceFile, UsedKeySet, patterns::PatternSet},
    reconcile::{self, Reconciliation},
    sizing::{self, SizingAnalysis},
};

/// Everything one analysis run consumes. Immutable for the duration of
/// the run.
#[derive(Debug)]
pub struct AnalysisInput<'a> {
    /// Source files, already read into memory.
    pub files: &'a [SourceFile],
    /// Parsed catalogs per language.
    pub catalogs: &'a HashMap<String, LanguageCatalog>,
    /// Ordered language codes; the first is the sizing baseline.
    pub languages: &'a [String],
    /// Language whose catalog is compared against used keys.
    pub source_language: &'a str,
    pub patterns: &'a PatternSet,
    pub threshold: f64,
    /// Warnings carried over from I/O collaborators (file reads,
    /// catalog parses).
    pub warnings: Vec<String>,
}

/// The result of one full analysis run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub source_files_scanned: usize,
    pub used_key_count: usize,
    pub dynamic_key_count: usize,
    pub unused: Vec<String>,
    pub missing: Vec<String>,
    pub sizing: SizingAnalysis,
    pub warnings: Vec<String>,
    #[serde(skip)]
    pub used: UsedKeySet,
}

impl AnalysisReport {
    /// True when the run surfaced anything actionable.
    pub fn has_findings(&self) -> bool {
        !self.unused.is_empty()
            || !self.missing.is_empty()
            || self.sizing.size_variations.iter().any(|v| v.is_problematic)
            || !self.sizing.problematic_keys.is_empty()
    }
}

/// Run the full pipeline: extraction, reconciliation, sizing, assembly.
///
/// Pure over its input snapshot; running twice on identical inputs
/// yields structurally identical reports.
pub fn run_analysis(input: AnalysisInput) -> AnalysisReport {
    let used = extract::scan_sources(input.files, input.patterns);

    let available: HashSet<String> = input
        .catalogs
        .get(input.source_language)
        .map(|catalog| catalog.entries.iter().map(|e| e.key.clone()).collect())
        .unwrap_or_default();

    let Reconciliation { unused, missing } = reconcile::reconcile(&used, &available);

    let sizing = sizing::analyze(input.catalogs, input.languages, input.threshold);

    let all_keys = used.all_keys();
    let used_key_count = all_keys.len();
    let dynamic_key_count = all_keys.iter().filter(|k| k.is_dynamic).count();
    drop(all_keys);

    AnalysisReport {
        source_files_scanned: input.files.len(),
        used_key_count,
        dynamic_key_count,
        unused,
        missing,
        sizing,
        warnings: input.warnings,
        used,
    }
}
