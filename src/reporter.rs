//! Report rendering and printing utilities.
//!
//! This module is separate from the core analysis logic so keyscope can
//! be used as a library without printing side effects. The output format
//! never feeds back into analysis.

use anyhow::{Context, Result};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::{
    config::OutputFormat,
    report::AnalysisReport,
    sizing::SizingAnalysis,
};

/// Render the full report in the requested format.
pub fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(report)),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Csv => Ok(render_csv(report)),
    }
}

/// Print accumulated warnings to stderr, so they stay visible even when
/// the rendered report goes to a file or a pipe.
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("{} {}", "warning:".bold().yellow(), warning);
    }
}

/// A titled plain list of keys, used by the `unused` and `missing`
/// commands.
pub fn render_key_list(title: &str, keys: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", title, keys.len()));
    for key in keys {
        out.push_str(&format!("  {}\n", key));
    }
    out
}

/// Pad to a display width using unicode widths, so CJK language names
/// and values align.
fn pad(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    let padding = width.saturating_sub(current);
    format!("{}{}", text, " ".repeat(padding))
}

pub fn render_sizing(sizing: &SizingAnalysis) -> String {
    let mut out = String::new();

    let baseline = match sizing.languages.first() {
        Some(b) => b.as_str(),
        None => return out,
    };

    out.push_str(&format!("Language sizing (baseline: {})\n", baseline));

    let header = ["language", "keys", "chars", "avg", "max", "min", "empty", "long"];
    let mut rows: Vec<Vec<String>> = Vec::new();
    for lang in &sizing.languages {
        let Some(stats) = sizing.language_stats.get(lang) else {
            continue;
        };
        rows.push(vec![
            lang.clone(),
            stats.total_keys.to_string(),
            stats.total_characters.to_string(),
            format!("{:.1}", stats.average_key_length),
            stats.max_key_length.to_string(),
            stats.min_key_length.to_string(),
            stats.empty_keys.to_string(),
            stats.long_keys.to_string(),
        ]);
    }

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| UnicodeWidthStr::width(r[i].as_str()))
                .chain([UnicodeWidthStr::width(*h)])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render_row = |cells: &[String]| {
        let mut line = String::from(" ");
        for (i, cell) in cells.iter().enumerate() {
            line.push(' ');
            line.push_str(&pad(cell, widths[i]));
        }
        format!("{}\n", line.trim_end())
    };

    out.push_str(&render_row(
        &header.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
    ));
    for row in &rows {
        out.push_str(&render_row(row));
    }

    if !sizing.size_variations.is_empty() {
        out.push_str(&format!("\nSize variations vs '{}'\n", baseline));
        for v in &sizing.size_variations {
            let marker = if v.is_problematic { "  [!]" } else { "" };
            out.push_str(&format!(
                "  {}  {:+} chars  {:+.2}%{}\n",
                v.language, v.character_difference, v.percentage_difference, marker
            ));
        }
    }

    if !sizing.problematic_keys.is_empty() {
        out.push_str(&format!(
            "\nProblematic keys ({})\n",
            sizing.problematic_keys.len()
        ));
        for p in &sizing.problematic_keys {
            let details: Vec<String> = p
                .variations
                .iter()
                .map(|v| format!("{} {:+.1}%", v.language, v.percentage_difference))
                .collect();
            out.push_str(&format!("  {}  ({})\n", p.key, details.join(", ")));
        }
    }

    if !sizing.recommendations.is_empty() {
        out.push_str("\nRecommendations\n");
        for r in &sizing.recommendations {
            out.push_str(&format!("  - {}\n", r));
        }
    }

    out
}

fn render_table(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("Summary\n");
    out.push_str(&format!(
        "  source files scanned: {}\n",
        report.source_files_scanned
    ));
    out.push_str(&format!(
        "  used keys: {} ({} dynamic)\n",
        report.used_key_count, report.dynamic_key_count
    ));
    out.push('\n');

    out.push_str(&render_key_list("Unused keys", &report.unused));
    out.push('\n');
    out.push_str(&render_key_list("Missing keys", &report.missing));
    out.push('\n');
    out.push_str(&render_sizing(&report.sizing));

    out
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_row(cells: &[&str]) -> String {
    let escaped: Vec<String> = cells.iter().map(|c| csv_escape(c)).collect();
    format!("{}\n", escaped.join(","))
}

/// One record per row: unused/missing keys, per-language totals,
/// variations, problematic keys and recommendations.
fn render_csv(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str(&csv_row(&["record", "key", "language", "value"]));

    for key in &report.unused {
        out.push_str(&csv_row(&["unused", key, "", ""]));
    }
    for key in &report.missing {
        out.push_str(&csv_row(&["missing", key, "", ""]));
    }

    for lang in &report.sizing.languages {
        if let Some(stats) = report.sizing.language_stats.get(lang) {
            out.push_str(&csv_row(&[
                "total_characters",
                "",
                lang,
                &stats.total_characters.to_string(),
            ]));
        }
    }

    for v in &report.sizing.size_variations {
        out.push_str(&csv_row(&[
            "variation_percent",
            "",
            &v.language,
            &format!("{:.2}", v.percentage_difference),
        ]));
    }

    for p in &report.sizing.problematic_keys {
        for v in &p.variations {
            out.push_str(&csv_row(&[
                "problematic_key",
                &p.key,
                &v.language,
                &format!("{:.2}", v.percentage_difference),
            ]));
        }
    }

    for r in &report.sizing.recommendations {
        out.push_str(&csv_row(&["recommendation", "", "", r]));
    }

    out
}
