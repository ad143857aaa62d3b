//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "podlint",
    version,
    about = "Lint pod specifications",
    long_about = "Podlint — validate .podspec.json/.podspec.yaml files against packaging rules, once per target platform.\n\nConfiguration precedence: CLI > podlint.toml > defaults.",
    after_help = "Examples:\n  podlint lint MyPod.podspec.json\n  podlint lint specs/ --platforms ios,osx --output json\n  podlint lint --allow-warnings",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current podlint version."
    )]
    Version,
    /// Lint specification files
    #[command(
        about = "Run lint checks",
        long_about = "Validate specification files for every supported platform. Errors always fail; warnings fail unless allowed.",
        after_help = "Examples:\n  podlint lint Pod.podspec.json\n  podlint lint specs/ --output json"
    )]
    Lint {
        #[arg(help = "Spec files or directories (default: project root)")]
        paths: Vec<PathBuf>,
        #[arg(long, help = "Project root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, value_delimiter = ',', help = "Platforms to lint: ios,osx,tvos,watchos,visionos")]
        platforms: Option<Vec<String>>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Do not fail on warnings")]
        allow_warnings: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Lint the root spec only")]
        no_subspecs: bool,
        #[arg(short, long, action = clap::ArgAction::SetTrue, help = "Print debug logs to stderr")]
        verbose: bool,
    },
}
