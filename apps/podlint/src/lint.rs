//! Lint runner: evaluates a specification once per (spec, platform) pair.
//!
//! Each pair gets its own consumer and analyzer, so pairs run in parallel.
//! Partial results are merged back in pair order (specs outer, platforms
//! inner), which gives the same report a single sequential analyzer would.

use crate::analyzer::Analyzer;
use crate::consumer::PlatformConsumer;
use crate::models::platform::Platform;
use crate::models::spec::Specification;
use crate::models::{Report, Results};
use glob::glob;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File name suffixes recognized when a directory is given.
pub const SPEC_SUFFIXES: [&str; 3] = ["podspec.json", "podspec.yaml", "podspec.yml"];

#[derive(Debug, Clone)]
/// Knobs for a lint run.
pub struct LintOptions {
    /// Platforms to lint for; intersected with what each spec supports.
    pub platforms: Vec<Platform>,
    /// Also lint nested subspecs.
    pub subspecs: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        LintOptions {
            platforms: Platform::ALL.to_vec(),
            subspecs: true,
        }
    }
}

/// Platforms to evaluate for one lineage: requested ∩ every declared set.
fn lineage_platforms(lineage: &[&Specification], requested: &[Platform]) -> Vec<Platform> {
    requested
        .iter()
        .copied()
        .filter(|p| lineage.iter().all(|s| s.available_platforms().contains(p)))
        .collect()
}

/// Lint one specification and its subspecs.
pub fn lint_spec(spec: &Specification, opts: &LintOptions) -> Report {
    let lineages = if opts.subspecs {
        spec.lineages()
    } else {
        vec![vec![spec]]
    };

    let mut pairs: Vec<(Vec<&Specification>, Option<Platform>)> = Vec::new();
    for lineage in lineages {
        let platforms = lineage_platforms(&lineage, &opts.platforms);
        if platforms.is_empty() {
            pairs.push((lineage, None));
        } else {
            for p in platforms {
                pairs.push((lineage.clone(), Some(p)));
            }
        }
    }
    log::debug!(
        "linting {} across {} spec/platform pairs",
        spec.display_name(),
        pairs.len()
    );

    let partials: Vec<Results> = pairs
        .into_par_iter()
        .filter_map(|(lineage, platform)| {
            let consumer = PlatformConsumer::new(lineage, platform)?;
            let mut analyzer = Analyzer::new(&consumer);
            analyzer.analyze();
            Some(analyzer.into_results())
        })
        .collect();

    let mut results = Results::new();
    for partial in partials {
        results.absorb(partial);
    }
    Report::new(
        spec.display_name(),
        lineage_platforms(&[spec], &opts.platforms),
        results,
    )
}

/// Expand the given paths into specification files. Directories are searched
/// recursively for `*.podspec.{json,yaml,yml}`; files are taken as-is.
pub fn collect_spec_files(paths: &[PathBuf], errors: &mut Vec<String>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = Vec::new();
            for suffix in SPEC_SUFFIXES {
                let pattern = path.join("**").join(format!("*.{}", suffix));
                let pattern = pattern.to_string_lossy().to_string();
                match glob(&pattern) {
                    Ok(entries) => found.extend(entries.flatten()),
                    Err(e) => errors.push(format!("bad search pattern {}: {}", pattern, e)),
                }
            }
            if found.is_empty() {
                log::warn!("no specification files under {}", path.display());
            }
            found.sort();
            for f in found {
                push_unseen(&mut files, &mut seen, f);
            }
        } else if path.is_file() {
            push_unseen(&mut files, &mut seen, path.clone());
        } else {
            errors.push(format!("Specification not found: {}", path.display()));
        }
    }
    files
}

// Same file reached twice (directory + explicit path) is linted once.
fn push_unseen(files: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>, file: PathBuf) {
    let key = file.canonicalize().unwrap_or_else(|_| file.clone());
    if seen.insert(key) {
        files.push(file);
    }
}

/// Load and lint every specification reachable from `paths`.
///
/// Load failures are collected as messages and never stop the other files.
pub fn lint_paths(
    root: &Path,
    paths: &[PathBuf],
    opts: &LintOptions,
) -> (Vec<Report>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let files = collect_spec_files(paths, &mut errors);
    let mut reports: Vec<Report> = Vec::new();
    for file in files {
        match Specification::from_path(&file) {
            Ok(spec) => {
                let mut report = lint_spec(&spec, opts);
                report.file = Some(display_path(root, &file));
                reports.push(report);
            }
            Err(e) => errors.push(e.to_string()),
        }
    }
    (reports, errors)
}

fn display_path(root: &Path, file: &Path) -> String {
    let abs_root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let abs_file = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());
    pathdiff::diff_paths(&abs_file, &abs_root)
        .filter(|p| !p.starts_with(".."))
        .unwrap_or(abs_file)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use std::fs;
    use tempfile::tempdir;

    fn parse(json: &str) -> Specification {
        Specification::from_json_str(json).unwrap()
    }

    #[test]
    fn test_platforms_accumulate_on_shared_findings() {
        let spec = parse(r#"{ "name": "Pod", "platforms": { "ios": "12.0", "osx": "10.13" } }"#);
        let report = lint_spec(&spec, &LintOptions::default());
        assert_eq!(report.platforms, vec![Platform::Ios, Platform::Osx]);
        let items = report.results.as_slice();
        assert_eq!(items.len(), 2);
        for r in items {
            assert_eq!(r.platforms(), &[Platform::Ios, Platform::Osx]);
        }
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.warnings, 1);
    }

    #[test]
    fn test_platform_specific_finding_only_names_that_platform() {
        let spec = parse(
            r#"{ "name": "Pod", "requires_arc": true, "source_files": "a.m",
                 "platforms": { "ios": "12.0", "osx": "10.13" },
                 "osx": { "resources": ["/Library/x.png"] } }"#,
        );
        let report = lint_spec(&spec, &LintOptions::default());
        let items = report.results.as_slice();
        assert_eq!(items.len(), 1);
        assert!(items[0].message().ends_with("(resources)."));
        assert_eq!(items[0].platforms(), &[Platform::Osx]);
    }

    #[test]
    fn test_subspecs_are_linted_in_order() {
        let spec = parse(
            r#"{ "name": "Pod", "version": "1.0", "requires_arc": true,
                 "platforms": { "ios": "12.0" },
                 "subspecs": [ { "name": "A" }, { "name": "B", "source_files": "b.m" } ] }"#,
        );
        let report = lint_spec(&spec, &LintOptions::default());
        let msgs: Vec<&str> = report.results.iter().map(|r| r.message()).collect();
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].starts_with("The Pod/A (1.0) spec is empty"));

        let root_only = lint_spec(
            &spec,
            &LintOptions {
                subspecs: false,
                ..LintOptions::default()
            },
        );
        assert!(root_only.results.is_empty());
    }

    #[test]
    fn test_no_matching_platform_runs_without_platform() {
        let spec = parse(r#"{ "name": "Pod", "platforms": { "tvos": "15.0" } }"#);
        let opts = LintOptions {
            platforms: vec![Platform::Ios],
            subspecs: true,
        };
        let report = lint_spec(&spec, &opts);
        assert!(report.platforms.is_empty());
        assert_eq!(report.results.len(), 2);
        assert!(report.results.iter().all(|r| r.platforms().is_empty()));
    }

    #[test]
    fn test_parallel_merge_matches_sequential_analyzer() {
        let spec = parse(
            r#"{ "name": "Pod", "pre_install": "x",
                 "ios": { "source_files": "/abs.m" },
                 "tvos": { "requires_arc": true, "source_files": "t.m" } }"#,
        );
        let report = lint_spec(&spec, &LintOptions::default());

        let consumers: Vec<PlatformConsumer> = Platform::ALL
            .iter()
            .map(|p| PlatformConsumer::root(&spec, Some(*p)))
            .collect();
        let mut seq = Analyzer::new(&consumers[0]);
        seq.analyze();
        for c in &consumers[1..] {
            seq.rebind(c);
            seq.analyze();
        }

        let left: Vec<(Severity, &str, Vec<Platform>)> = report
            .results
            .iter()
            .map(|r| (r.severity(), r.message(), r.platforms().to_vec()))
            .collect();
        let right: Vec<(Severity, &str, Vec<Platform>)> = seq
            .results()
            .iter()
            .map(|r| (r.severity(), r.message(), r.platforms().to_vec()))
            .collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_lint_paths_walks_directories_and_collects_load_errors() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("specs/nested")).unwrap();
        fs::write(
            root.join("specs/Good.podspec.json"),
            r#"{ "name": "Good", "requires_arc": true, "source_files": "a.m" }"#,
        )
        .unwrap();
        fs::write(
            root.join("specs/nested/Empty.podspec.yaml"),
            "name: Empty\nrequires_arc: false\n",
        )
        .unwrap();
        fs::write(root.join("specs/Broken.podspec.json"), "{ not json").unwrap();
        fs::write(root.join("specs/README.md"), "ignored").unwrap();

        let (reports, errors) = lint_paths(
            root,
            &[root.join("specs"), root.join("missing.podspec.json")],
            &LintOptions::default(),
        );
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].file.as_deref(), Some("specs/Good.podspec.json"));
        assert!(reports[0].passed(false));
        assert_eq!(reports[1].spec, "Empty");
        assert_eq!(reports[1].summary.errors, 1);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("Broken.podspec.json")));
        assert!(errors.iter().any(|e| e.starts_with("Specification not found")));
    }

    #[test]
    fn test_file_inside_given_directory_is_linted_once() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("specs")).unwrap();
        fs::write(root.join("specs/A.podspec.json"), r#"{ "name": "A" }"#).unwrap();
        fs::write(root.join("specs/B.podspec.json"), r#"{ "name": "B" }"#).unwrap();

        let (reports, errors) = lint_paths(
            root,
            &[
                root.join("specs"),
                root.join("specs/A.podspec.json"),
                root.join("specs/../specs/B.podspec.json"),
            ],
            &LintOptions::default(),
        );
        assert!(errors.is_empty());
        let names: Vec<&str> = reports.iter().map(|r| r.spec.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
