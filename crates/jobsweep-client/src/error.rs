use jobsweep_core::errors::{ConfigError, DetectError};
use jobsweep_core::model::{JobId, LifecycleState};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error("Failed to submit job '{job_id}': {source}")]
    Submit {
        job_id: JobId,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload of '{path}' to container '{container}' failed: {source}")]
    Upload {
        path: PathBuf,
        container: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Copy of '{src}' to '{dest}' failed: {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to archive '{path}': {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list '{path}': {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove '{path}': {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Detection for state '{state}' is missing its {what}")]
    IncompleteDetection {
        state: LifecycleState,
        what: &'static str,
    },
}

impl SweepError {
    /// Structural anomalies: skip the job this pass, deleting nothing.
    pub fn is_structural(&self) -> bool {
        matches!(self, SweepError::Detect(e) if e.is_structural())
    }

    /// Transient I/O: the job's remaining sequence was aborted with the
    /// working directory untouched; the next pass retries from scratch.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SweepError::Submit { .. }
                | SweepError::Upload { .. }
                | SweepError::Copy { .. }
                | SweepError::Archive { .. }
                | SweepError::List { .. }
                | SweepError::Remove { .. }
                | SweepError::Detect(DetectError::PathIo { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
