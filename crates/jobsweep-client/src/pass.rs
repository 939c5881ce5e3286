use crate::error::{Result, SweepError};
use crate::orchestrator::{Orchestrator, Outcome};
use jobsweep_core::constants::files;
use jobsweep_core::detect;
use jobsweep_core::errors::ConfigError;
use jobsweep_core::model::JobDescriptor;
use std::path::Path;

/// Per-outcome counts for one full sweep, reported by the CLI.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub discovered: usize,
    pub submitted: usize,
    pub already_submitted: usize,
    pub queued: usize,
    pub running: usize,
    pub archived: usize,
    pub failures_recorded: usize,
    /// Structural anomalies, skipped without touching the job.
    pub skipped: usize,
    /// Sequences aborted on transient I/O errors; retried next pass.
    pub aborted: usize,
}

impl PassSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Submitted => self.submitted += 1,
            Outcome::AlreadySubmitted => self.already_submitted += 1,
            Outcome::Waiting => self.queued += 1,
            Outcome::ProgressMirrored => self.running += 1,
            Outcome::Archived => self.archived += 1,
            Outcome::FailureRecorded => self.failures_recorded += 1,
        }
    }

    pub fn had_errors(&self) -> bool {
        self.skipped > 0 || self.aborted > 0
    }
}

/// Enumerates job descriptors (`*.json`) in the working directory,
/// sorted by job id for a deterministic processing order.
pub fn discover_descriptors(work_dir: &Path) -> Result<Vec<JobDescriptor>> {
    let mut descriptors = Vec::new();
    for entry in fs_err::read_dir(work_dir).map_err(|source| {
        SweepError::Config(ConfigError::PathIo {
            path: work_dir.to_path_buf(),
            source,
        })
    })? {
        let entry = entry.map_err(|e| SweepError::Config(ConfigError::Io(e)))?;
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|e| e != files::DESCRIPTOR_EXT) {
            continue;
        }
        match JobDescriptor::from_path(&path) {
            Some(descriptor) => descriptors.push(descriptor),
            None => tracing::warn!("Ignoring unusable descriptor path {}", path.display()),
        }
    }
    descriptors.sort_by(|a, b| a.job_id.cmp(&b.job_id));
    Ok(descriptors)
}

/// One pass: detect + act for every discovered descriptor. Job-local
/// errors are logged and counted but never cross job boundaries; only
/// a failure to enumerate the working directory aborts the pass.
pub fn run_pass(orchestrator: &Orchestrator) -> Result<PassSummary> {
    let work_dir = &orchestrator.config().work_dir;
    let descriptors = discover_descriptors(work_dir)?;
    tracing::info!(
        "Starting pass over {} ({} descriptors)",
        work_dir.display(),
        descriptors.len()
    );

    let mut summary = PassSummary::default();
    for descriptor in descriptors {
        summary.discovered += 1;
        tracing::info!("Checking job {}", descriptor.job_id);
        let result = detect::detect(&descriptor)
            .map_err(SweepError::Detect)
            .and_then(|detection| orchestrator.process(&descriptor, &detection));
        match result {
            Ok(outcome) => summary.record(outcome),
            Err(err) if err.is_structural() => {
                tracing::warn!("Skipping job {} this pass: {}", descriptor.job_id, err);
                summary.skipped += 1;
            }
            Err(err) => {
                tracing::error!(
                    "Job {} aborted mid-sequence, will retry next pass: {}",
                    descriptor.job_id,
                    err
                );
                summary.aborted += 1;
            }
        }
    }
    tracing::info!("Pass complete: {:?}", summary);
    Ok(summary)
}
