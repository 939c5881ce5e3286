use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error on path '{path}': {source}")]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    General(String),

    #[error("The {role} directory '{path}' does not exist. Create it before starting a sweep.")]
    DirectoryMissing { role: &'static str, path: PathBuf },

    #[error("The {role} path '{path}' exists but is not a directory.")]
    NotADirectory { role: &'static str, path: PathBuf },

    #[error("Unknown pipeline '{name}'. Known pipelines: {}", known.join(", "))]
    UnknownPipeline { name: String, known: Vec<String> },

    #[error("Invalid prune pattern '{pattern}' for pipeline '{pipeline}': {source}")]
    InvalidPrunePattern {
        pipeline: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("I/O error on path '{path}': {source}")]
    PathIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Found {count} log files in '{run_dir}'. Expected exactly one; refusing to guess which is authoritative."
    )]
    MultipleLogs { run_dir: PathBuf, count: usize },
}

impl DetectError {
    /// Structural anomalies are logged and skipped for the pass;
    /// everything else is ordinary I/O trouble.
    pub fn is_structural(&self) -> bool {
        matches!(self, DetectError::MultipleLogs { .. })
    }
}
