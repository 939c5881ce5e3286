use crate::constants::{dirs, files};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Ord, PartialOrd)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        JobId(s)
    }
}

impl FromStr for JobId {
    type Err = std::convert::Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(JobId(s.to_string()))
    }
}

/// One job as identified by its descriptor file in the working
/// directory. Every other path is derived from the descriptor path:
/// `<work_dir>/<job_id>.json` -> run dir `<work_dir>/<job_id>`,
/// results `<run_dir>/results`, submission wrapper
/// `<work_dir>/<job_id>.json.sh`, archive `<work_dir>/<job_id>.tar.gz`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub job_id: JobId,
    pub descriptor_path: PathBuf,
}

impl JobDescriptor {
    /// Returns `None` for paths without a usable UTF-8 file stem.
    pub fn from_path(descriptor_path: &Path) -> Option<Self> {
        let stem = descriptor_path.file_stem()?.to_str()?;
        if stem.is_empty() {
            return None;
        }
        Some(Self {
            job_id: JobId(stem.to_string()),
            descriptor_path: descriptor_path.to_path_buf(),
        })
    }

    pub fn run_dir(&self) -> PathBuf {
        self.descriptor_path.with_extension("")
    }

    pub fn results_dir(&self) -> PathBuf {
        self.run_dir().join(dirs::RESULTS)
    }

    /// The wrapper script doubles as the "already submitted" marker.
    pub fn wrapper_path(&self) -> PathBuf {
        let mut path = self.descriptor_path.clone().into_os_string();
        path.push(files::WRAPPER_SUFFIX);
        PathBuf::from(path)
    }

    pub fn archive_path(&self) -> PathBuf {
        let mut path = self.run_dir().into_os_string();
        path.push(files::ARCHIVE_SUFFIX);
        PathBuf::from(path)
    }
}

/// Derived from filesystem evidence every pass; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Unsubmitted,
    Queued,
    Running,
    Succeeded,
    Failed,
}

impl LifecycleState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleState::Succeeded | LifecycleState::Failed)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Unsubmitted => write!(f, "unsubmitted"),
            LifecycleState::Queued => write!(f, "queued"),
            LifecycleState::Running => write!(f, "running"),
            LifecycleState::Succeeded => write!(f, "succeeded"),
            LifecycleState::Failed => write!(f, "failed"),
        }
    }
}

/// Output of the state detector: the inferred state plus whatever
/// evidence paths exist at that point in the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub state: LifecycleState,
    pub run_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Detection {
    pub fn unsubmitted() -> Self {
        Self {
            state: LifecycleState::Unsubmitted,
            run_dir: None,
            log_file: None,
        }
    }

    pub fn queued(run_dir: PathBuf) -> Self {
        Self {
            state: LifecycleState::Queued,
            run_dir: Some(run_dir),
            log_file: None,
        }
    }

    pub fn started(state: LifecycleState, run_dir: PathBuf, log_file: PathBuf) -> Self {
        Self {
            state,
            run_dir: Some(run_dir),
            log_file: Some(log_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_derived_paths() {
        let desc = JobDescriptor::from_path(Path::new("/work/job7.json")).unwrap();
        assert_eq!(desc.job_id, JobId("job7".to_string()));
        assert_eq!(desc.run_dir(), PathBuf::from("/work/job7"));
        assert_eq!(desc.results_dir(), PathBuf::from("/work/job7/results"));
        assert_eq!(desc.wrapper_path(), PathBuf::from("/work/job7.json.sh"));
        assert_eq!(desc.archive_path(), PathBuf::from("/work/job7.tar.gz"));
    }

    #[test]
    fn test_descriptor_rejects_stemless_path() {
        assert!(JobDescriptor::from_path(Path::new("/")).is_none());
    }

    #[test]
    fn test_terminal_states() {
        assert!(LifecycleState::Succeeded.is_terminal());
        assert!(LifecycleState::Failed.is_terminal());
        assert!(!LifecycleState::Running.is_terminal());
        assert!(!LifecycleState::Queued.is_terminal());
        assert!(!LifecycleState::Unsubmitted.is_terminal());
    }
}
