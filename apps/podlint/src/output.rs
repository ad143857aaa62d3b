//! Output rendering for lint reports.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! every report with its findings and a top-level summary.

use crate::models::platform::Platform;
use crate::models::{LintResult, Report, Severity};
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && utils::colors_enabled()
}

/// Platforms to annotate a finding with: unique, first-seen order, and
/// nothing when the finding applies to every platform the spec was linted for.
pub fn platform_suffix(result: &LintResult, linted: &[Platform]) -> Option<String> {
    let mut seen: Vec<Platform> = Vec::new();
    for p in result.platforms() {
        if !seen.contains(p) {
            seen.push(*p);
        }
    }
    if seen.is_empty() {
        return None;
    }
    let covers_all = !linted.is_empty()
        && seen.len() == linted.len()
        && linted.iter().all(|p| seen.contains(p));
    if covers_all {
        return None;
    }
    let names: Vec<&str> = seen.iter().map(|p| p.display_name()).collect();
    Some(format!("[{}]", names.join(" - ")))
}

/// One plain-text line for a finding, e.g. `- ERROR | [iOS] message`.
pub fn format_result_line(result: &LintResult, linted: &[Platform]) -> String {
    let label = format!("{:<5}", result.severity().label());
    match platform_suffix(result, linted) {
        Some(s) => format!("- {} | {} {}", label, s, result.message()),
        None => format!("- {} | {}", label, result.message()),
    }
}

/// Print lint reports in the requested format, plus any load errors.
pub fn print_lint(reports: &[Report], output: &str, allow_warnings: bool, errors: &[String]) {
    match output {
        "json" => {
            let out = compose_lint_json(reports, allow_warnings, errors);
            println!(
                "{}",
                serde_json::to_string_pretty(&out).unwrap_or_else(|_| out.to_string())
            );
        }
        _ => {
            let color = use_colors(output);
            for e in errors {
                eprintln!("{} {}", utils::error_prefix(), e);
            }
            for r in reports {
                let passed = r.passed(allow_warnings);
                let icon = match (passed, color) {
                    (true, true) => "✔".green().to_string(),
                    (false, true) => "✖".red().to_string(),
                    (true, false) => "✔".to_string(),
                    (false, false) => "✖".to_string(),
                };
                let name = if color {
                    r.spec.clone().bold().to_string()
                } else {
                    r.spec.clone()
                };
                match &r.file {
                    Some(f) => println!("{} {} ❲{}❳", icon, name, f),
                    None => println!("{} {}", icon, name),
                }
                for res in r.results.iter() {
                    let line = format_result_line(res, &r.platforms);
                    if !color {
                        println!("    {}", line);
                        continue;
                    }
                    match res.severity() {
                        Severity::Error => println!("    {}", line.red()),
                        Severity::Warning => println!("    {}", line.yellow()),
                    }
                }
            }
            let failed = reports.iter().filter(|r| !r.passed(allow_warnings)).count();
            let summary = format!(
                "— Summary — specs={} failed={} errors={} warnings={}",
                reports.len(),
                failed,
                reports.iter().map(|r| r.summary.errors).sum::<usize>(),
                reports.iter().map(|r| r.summary.warnings).sum::<usize>(),
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(reports: &[Report], allow_warnings: bool, errors: &[String]) -> JsonVal {
    let items: Vec<_> = reports
        .iter()
        .map(|r| {
            json!({
                "spec": r.spec,
                "file": r.file,
                "platforms": r.platforms,
                "passed": r.passed(allow_warnings),
                "results": r.results,
                "summary": r.summary,
            })
        })
        .collect();
    let summary = json!({
        "specs": reports.len(),
        "failed": reports.iter().filter(|r| !r.passed(allow_warnings)).count(),
        "errors": reports.iter().map(|r| r.summary.errors).sum::<usize>(),
        "warnings": reports.iter().map(|r| r.summary.warnings).sum::<usize>(),
    });
    json!({"reports": items, "errors": errors, "summary": summary})
}
