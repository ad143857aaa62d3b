//! Operational errors. Lint findings are never reported through these types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
/// Failure to read or decode a specification file.
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a valid JSON specification: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} is not a valid YAML specification: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("unsupported specification format: {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Error)]
/// Invalid configuration file or CLI override.
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid TOML: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{0}")]
    Platform(String),
    #[error("unknown output mode '{0}' (expected human or json)")]
    Output(String),
}
