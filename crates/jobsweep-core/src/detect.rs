use crate::constants::{files, markers};
use crate::errors::DetectError;
use crate::model::{Detection, JobDescriptor, LifecycleState};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Maps filesystem evidence to a lifecycle state. Read-only: the only
/// filesystem access is existence checks, directory listings and a
/// scan of the single log file.
///
/// Precedence is deliberate and fixed: a non-empty results directory
/// means `Succeeded` regardless of what the log contains; terminal
/// markers in the log are consulted only when results are absent.
pub fn detect(descriptor: &JobDescriptor) -> Result<Detection, DetectError> {
    let run_dir = descriptor.run_dir();
    if !run_dir.exists() {
        tracing::debug!(
            "No run directory for {}; not yet submitted",
            descriptor.job_id
        );
        return Ok(Detection::unsubmitted());
    }

    let mut logs = list_log_files(&run_dir)?;
    let log_file = match logs.len() {
        0 => {
            tracing::debug!(
                "No log file yet in {}; job is queued",
                run_dir.display()
            );
            return Ok(Detection::queued(run_dir));
        }
        1 => logs.remove(0),
        count => return Err(DetectError::MultipleLogs { run_dir, count }),
    };

    if !results_empty(&descriptor.results_dir())? {
        return Ok(Detection::started(
            LifecycleState::Succeeded,
            run_dir,
            log_file,
        ));
    }

    // No results: a terminal marker means the engine stopped without
    // producing anything, which we judge as failure.
    let state = if log_is_terminal(&log_file)? {
        LifecycleState::Failed
    } else {
        LifecycleState::Running
    };
    Ok(Detection::started(state, run_dir, log_file))
}

fn list_log_files(run_dir: &Path) -> Result<Vec<PathBuf>, DetectError> {
    let mut logs = Vec::new();
    for entry in fs_err::read_dir(run_dir).map_err(|e| path_io(run_dir, e))? {
        let entry = entry.map_err(|e| path_io(run_dir, e))?;
        if entry
            .file_name()
            .to_string_lossy()
            .ends_with(files::LOG_SUFFIX)
        {
            logs.push(entry.path());
        }
    }
    logs.sort();
    Ok(logs)
}

/// A results directory the scheduler has not created yet counts as
/// empty rather than an error; the job is simply not done.
fn results_empty(results_dir: &Path) -> Result<bool, DetectError> {
    if !results_dir.exists() {
        return Ok(true);
    }
    let mut entries = fs_err::read_dir(results_dir).map_err(|e| path_io(results_dir, e))?;
    Ok(entries.next().is_none())
}

fn log_is_terminal(log_file: &Path) -> Result<bool, DetectError> {
    let file = fs_err::File::open(log_file).map_err(|e| path_io(log_file, e))?;
    let reader = std::io::BufReader::new(file);
    for line in reader.lines() {
        let line = line.map_err(|e| path_io(log_file, e))?;
        let line = line.trim_end();
        if line.ends_with(markers::CWLTOOL_FINAL)
            || line.ends_with(markers::TOIL_FINAL)
            || line.ends_with(markers::CANCELLED)
            || line.contains(markers::PERMANENT_FAIL)
        {
            return Ok(true);
        }
    }
    Ok(false)
}

fn path_io(path: &Path, source: std::io::Error) -> DetectError {
    DetectError::PathIo {
        path: path.to_path_buf(),
        source,
    }
}
