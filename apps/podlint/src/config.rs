//! Configuration discovery and effective settings resolution.
//!
//! Podlint reads `podlint.toml|yaml|yml` from the project root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `platforms`: every supported platform
//! - `output`: `human`
//! - `allow_warnings`: false
//! - `subspecs`: true
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use crate::models::platform::{self, Platform};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["podlint.toml", "podlint.yaml", "podlint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `podlint.toml|yaml`.
pub struct PodlintConfig {
    pub platforms: Option<Vec<String>>,
    pub output: Option<String>,
    pub allow_warnings: Option<bool>,
    pub subspecs: Option<bool>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_found: bool,
    pub platforms: Vec<Platform>,
    pub output: String,
    pub allow_warnings: bool,
    pub subspecs: bool,
}

#[derive(Debug, Default, Clone)]
/// Values passed on the command line; `None` means "not given".
pub struct CliOverrides<'a> {
    pub repo_root: Option<&'a str>,
    pub platforms: Option<&'a [String]>,
    pub output: Option<&'a str>,
    pub allow_warnings: Option<bool>,
    pub subspecs: Option<bool>,
}

/// Walk upward from `start` to detect the project root.
///
/// Stops when a `podlint.toml|yaml|yml` or a `.git` directory is found.
/// Relative starts (including `.`) are made absolute first so that their
/// ancestors are visited.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    let mut cur = start.as_path();
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `PodlintConfig` from `podlint.toml` or `podlint.yaml|yml` if present.
///
/// A missing file is `Ok(None)`; an unreadable or malformed one is an error.
pub fn load_config(root: &Path) -> Result<Option<PodlintConfig>, ConfigError> {
    let toml_path = root.join("podlint.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).map_err(|source| ConfigError::Io {
            path: toml_path.clone(),
            source,
        })?;
        let cfg: PodlintConfig = toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: toml_path.clone(),
            source,
        })?;
        return Ok(Some(cfg));
    }
    for yml in ["podlint.yaml", "podlint.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).map_err(|source| ConfigError::Io {
                path: p.clone(),
                source,
            })?;
            let cfg: PodlintConfig =
                serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
                    path: p.clone(),
                    source,
                })?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides<'_>) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli.repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let platforms = match cli.platforms.map(|p| p.to_vec()).or(cfg.platforms) {
        Some(names) => {
            // accept comma-separated entries as well as repeated values
            let split: Vec<String> = names
                .iter()
                .flat_map(|n| n.split(','))
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect();
            platform::parse_list(&split).map_err(ConfigError::Platform)?
        }
        None => Platform::ALL.to_vec(),
    };

    let output = cli
        .output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(ConfigError::Output(output));
    }

    let allow_warnings = cli.allow_warnings.or(cfg.allow_warnings).unwrap_or(false);
    let subspecs = cli.subspecs.or(cfg.subspecs).unwrap_or(true);

    Ok(Effective {
        repo_root,
        config_found,
        platforms,
        output,
        allow_warnings,
        subspecs,
    })
}
