//! Keyscope - translation key reconciliation and sizing analysis
//!
//! Keyscope is a CLI tool and library for auditing internationalization
//! (i18n) catalogs against source code. It extracts translation-key
//! references with configurable patterns, reconciles them against
//! flattened catalogs to find unused and missing keys, and computes
//! cross-language size statistics with baseline-relative deviations.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and parsing
//! - `catalog`: Catalog flattening and loading
//! - `extract`: Source key extraction (patterns and scanning)
//! - `reconcile`: Unused/missing key reconciliation
//! - `sizing`: Cross-language size statistics
//! - `report`: Pipeline assembly into one result object
//! - `reporter`: Rendering (table, JSON, CSV)
//! - `scanner`: Source tree traversal

pub mod catalog;
pub mod cli;
pub mod config;
pub mod extract;
pub mod reconcile;
pub mod report;
pub mod reporter;
pub mod scanner;
pub mod sizing;
