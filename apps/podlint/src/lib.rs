//! Podlint core library.
//!
//! This crate lints package specifications (`.podspec.json` / `.podspec.yaml`)
//! against a fixed set of packaging rules. A specification is evaluated once
//! per target platform; identical findings from different platforms collapse
//! into one result that lists every platform that triggered it.
//!
//! High-level modules:
//! - `models`: Specification object model, platforms, findings and reports.
//! - `consumer`: Per-platform projection of a specification.
//! - `attributes`: Registry of file-pattern attributes.
//! - `analyzer`: The rule checks and finding aggregation.
//! - `lint`: Runs analyzers over spec/platform pairs and files on disk.
//! - `config`: Discovery and effective configuration resolution.
//! - `output`: Human/JSON printers.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`: Load and configuration errors.
//! - `utils`: Message prefixes and the stderr logger.
pub mod analyzer;
pub mod attributes;
pub mod cli;
pub mod config;
pub mod consumer;
pub mod error;
pub mod lint;
pub mod models;
pub mod output;
pub mod utils;
