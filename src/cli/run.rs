//! Main entry point for the keyscope CLI.
//!
//! Dispatches to the appropriate command handler based on the parsed
//! arguments. Orchestration only: configuration, file enumeration and
//! catalog loading feed the analysis pipeline in `report`, and the
//! rendered output goes through `reporter`.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use colored::Colorize;

use super::{
    args::{Arguments, Command, CommonArgs, UsageCommand},
    exit_status::ExitStatus,
};
use crate::{
    catalog::loader::scan_catalog_files,
    config::{CONFIG_FILE_NAME, Config, default_config_json, load_config},
    extract::{patterns::PatternSet, read_source_files},
    reconcile::find_key_usage,
    report::{AnalysisInput, AnalysisReport, run_analysis},
    reporter, scanner,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Analyze(args)) => analyze(args, Focus::All),
        Some(Command::Unused(args)) => analyze(args, Focus::Unused),
        Some(Command::Missing(args)) => analyze(args, Focus::Missing),
        Some(Command::Sizing(args)) => analyze(args, Focus::Sizing),
        Some(Command::Usage(cmd)) => usage(cmd),
        Some(Command::Init) => {
            init()?;
            println!("Created {}", CONFIG_FILE_NAME);
            Ok(ExitStatus::Success)
        }
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}

/// Which part of the report a command prints and gates its exit code on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    All,
    Unused,
    Missing,
    Sizing,
}

/// Merge CLI overrides into the loaded configuration.
fn apply_overrides(config: &mut Config, args: &CommonArgs) {
    if let Some(source_root) = &args.source_root {
        config.source_root = source_root.to_string_lossy().to_string();
    }
    if let Some(catalogs_root) = &args.catalogs_root {
        config.catalogs_root = catalogs_root.to_string_lossy().to_string();
    }
    if let Some(source_language) = &args.source_language {
        config.source_language = source_language.clone();
    }
    if !args.languages.is_empty() {
        config.languages = args.languages.clone();
    }
    if let Some(threshold) = args.threshold {
        config.length_threshold = threshold;
    }
    if let Some(format) = args.format {
        config.output_format = format;
    }
}

fn load_effective_config(args: &CommonArgs) -> Result<Config> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let mut config = load_config(&cwd)?.config;
    apply_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

/// Load catalogs and source files per the configuration, then run the
/// analysis pipeline over the in-memory snapshot.
pub fn load_and_analyze(config: &Config, base_dir: &Path) -> Result<AnalysisReport> {
    let source_root = base_dir.join(&config.source_root);
    if !source_root.exists() {
        bail!(
            "Source directory '{}' does not exist.\n\
             Hint: Check your {} 'sourceRoot' setting.",
            source_root.display(),
            CONFIG_FILE_NAME
        );
    }

    let catalogs_root = base_dir.join(&config.catalogs_root);
    let catalog_scan = scan_catalog_files(&catalogs_root, config.namespace.as_deref())?;

    let scan = scanner::scan_files(
        &source_root,
        &config.includes,
        &config.ignores,
        config.ignore_test_files,
    );

    let read = read_source_files(&scan.files);

    let patterns = PatternSet::compile(&config.static_patterns, &config.dynamic_patterns)?;

    let mut warnings = catalog_scan.warnings;
    warnings.extend(scan.warnings);
    warnings.extend(read.warnings);

    Ok(run_analysis(AnalysisInput {
        files: &read.files,
        catalogs: &catalog_scan.catalogs,
        languages: &config.languages,
        source_language: &config.source_language,
        patterns: &patterns,
        threshold: config.length_threshold,
        warnings,
    }))
}

fn analyze(args: CommonArgs, focus: Focus) -> Result<ExitStatus> {
    let config = load_effective_config(&args)?;
    let cwd = std::env::current_dir()?;
    let report = load_and_analyze(&config, &cwd)?;

    reporter::print_warnings(&report.warnings);

    let rendered = match focus {
        Focus::All => reporter::render(&report, config.output_format)?,
        Focus::Unused => reporter::render_key_list("Unused keys", &report.unused),
        Focus::Missing => reporter::render_key_list("Missing keys", &report.missing),
        Focus::Sizing => reporter::render_sizing(&report.sizing),
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {:?}", path))?;
            if args.verbose {
                eprintln!("Report written to {}", path.display());
            }
        }
        None => print!("{}", rendered),
    }

    let found = match focus {
        Focus::All => report.has_findings(),
        Focus::Unused => !report.unused.is_empty(),
        Focus::Missing => !report.missing.is_empty(),
        Focus::Sizing => {
            report.sizing.size_variations.iter().any(|v| v.is_problematic)
                || !report.sizing.problematic_keys.is_empty()
        }
    };

    Ok(if found {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

fn usage(cmd: UsageCommand) -> Result<ExitStatus> {
    let config = load_effective_config(&cmd.common)?;
    let cwd = std::env::current_dir()?;
    let report = load_and_analyze(&config, &cwd)?;

    reporter::print_warnings(&report.warnings);

    let files = find_key_usage(&report.used, &cmd.key);
    if files.is_empty() {
        println!("No files reference '{}'", cmd.key);
    } else {
        println!(
            "{} file(s) reference {}",
            files.len(),
            cmd.key.bold().cyan()
        );
        for file in files {
            println!("  {}", file);
        }
    }

    Ok(ExitStatus::Success)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::config::OutputFormat;

    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let args = CommonArgs {
            source_language: Some("ja".to_string()),
            languages: vec!["ja".to_string(), "en".to_string()],
            threshold: Some(25.0),
            format: Some(OutputFormat::Json),
            ..Default::default()
        };

        apply_overrides(&mut config, &args);

        assert_eq!(config.source_language, "ja");
        assert_eq!(config.languages, vec!["ja", "en"]);
        assert_eq!(config.length_threshold, 25.0);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_apply_overrides_keeps_config_when_absent() {
        let mut config = Config::default();
        apply_overrides(&mut config, &CommonArgs::default());

        assert_eq!(config.source_language, "en");
        assert_eq!(config.length_threshold, 50.0);
    }
}
