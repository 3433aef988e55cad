//! Error types for configuration loading and delegated tool execution.
//!
//! Neither kind ever aborts a check run: the runner turns `ToolError`
//! into findings, and the binary reports `ConfigError` before any check
//! starts.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for `{key}`: {value}")]
    Invalid { key: String, value: String },
}

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("`{program}` is not installed or not on PATH")]
    NotFound { program: String },

    #[error("failed to spawn `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed while waiting for `{program}`")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` timed out after {secs}s")]
    TimedOut { program: String, secs: u64 },
}
