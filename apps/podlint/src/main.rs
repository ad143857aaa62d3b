//! Podlint CLI binary entry point.
//! Resolves configuration, lints the requested specs and prints results.

use clap::Parser;
use podlint::cli::{Cli, Commands};
use podlint::config::{self, CliOverrides};
use podlint::lint::{self, LintOptions};
use podlint::{output, utils};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            paths,
            repo_root,
            platforms,
            output,
            allow_warnings,
            no_subspecs,
            verbose,
        } => {
            utils::init_logging(verbose);
            let eff = match config::resolve_effective(&CliOverrides {
                repo_root: repo_root.as_deref(),
                platforms: platforms.as_deref(),
                output: output.as_deref(),
                allow_warnings: if allow_warnings { Some(true) } else { None },
                subspecs: if no_subspecs { Some(false) } else { None },
            }) {
                Ok(eff) => eff,
                Err(e) => {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    std::process::exit(2);
                }
            };
            if !eff.config_found && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No podlint.toml found; using defaults."
                );
            }

            let targets = if paths.is_empty() {
                vec![eff.repo_root.clone()]
            } else {
                paths
            };
            let opts = LintOptions {
                platforms: eff.platforms.clone(),
                subspecs: eff.subspecs,
            };
            let (reports, errors) = lint::lint_paths(&eff.repo_root, &targets, &opts);
            if reports.is_empty() && errors.is_empty() {
                eprintln!(
                    "{} {}",
                    utils::error_prefix(),
                    "No specification files found (*.podspec.json, *.podspec.yaml)."
                );
                std::process::exit(2);
            }
            output::print_lint(&reports, &eff.output, eff.allow_warnings, &errors);
            if reports.iter().any(|r| !r.passed(eff.allow_warnings)) {
                std::process::exit(1);
            }
            if !errors.is_empty() {
                std::process::exit(2);
            }
        }
    }
}
