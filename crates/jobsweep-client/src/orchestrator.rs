use crate::error::{Result, SweepError};
use jobsweep_core::config::Config;
use jobsweep_core::gateway::{Archiver, BlobStore, FsGateway, Scheduler};
use jobsweep_core::model::{Detection, JobDescriptor, LifecycleState};
use jobsweep_core::prune::PruneRules;
use std::path::Path;
use std::sync::Arc;

/// What the orchestrator did for one job in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Submitted,
    AlreadySubmitted,
    Waiting,
    ProgressMirrored,
    Archived,
    FailureRecorded,
}

/// Executes the state-appropriate action sequence for one job against
/// the four external collaborators. Owns the lifetime of the job's
/// on-disk representation: nothing else deletes descriptors, run
/// directories or archives.
///
/// Every sequence is safe to re-run after a crash at any point: each
/// mutating step either checks existence first or is a pure overwrite
/// of remote state, and deletion is strictly the last step.
pub struct Orchestrator {
    config: Config,
    prune_rules: PruneRules,
    scheduler: Arc<dyn Scheduler>,
    blobs: Arc<dyn BlobStore>,
    archiver: Arc<dyn Archiver>,
    fs: Arc<dyn FsGateway>,
}

impl Orchestrator {
    pub fn new(
        config: Config,
        prune_rules: PruneRules,
        scheduler: Arc<dyn Scheduler>,
        blobs: Arc<dyn BlobStore>,
        archiver: Arc<dyn Archiver>,
        fs: Arc<dyn FsGateway>,
    ) -> Self {
        Self {
            config,
            prune_rules,
            scheduler,
            blobs,
            archiver,
            fs,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn process(&self, descriptor: &JobDescriptor, detection: &Detection) -> Result<Outcome> {
        match detection.state {
            LifecycleState::Unsubmitted => self.submit(descriptor),
            LifecycleState::Queued => {
                tracing::info!(
                    "Job {} submitted but has not started yet (in queue)",
                    descriptor.job_id
                );
                Ok(Outcome::Waiting)
            }
            LifecycleState::Running => {
                let log_file = require(detection, detection.log_file.as_deref(), "log file")?;
                self.mirror_progress(descriptor, log_file)
            }
            LifecycleState::Succeeded => {
                let run_dir = require(detection, detection.run_dir.as_deref(), "run directory")?;
                self.archive_success(descriptor, run_dir)
            }
            LifecycleState::Failed => {
                let run_dir = require(detection, detection.run_dir.as_deref(), "run directory")?;
                let log_file = require(detection, detection.log_file.as_deref(), "log file")?;
                self.record_failure(descriptor, run_dir, log_file)
            }
        }
    }

    fn submit(&self, descriptor: &JobDescriptor) -> Result<Outcome> {
        let wrapper = descriptor.wrapper_path();
        if self.fs.exists(&wrapper) {
            tracing::info!(
                "Script {} submitted, will not recreate",
                wrapper.display()
            );
            return Ok(Outcome::AlreadySubmitted);
        }
        self.scheduler
            .submit(descriptor, &self.config.work_dir)
            .map_err(|source| SweepError::Submit {
                job_id: descriptor.job_id.clone(),
                source,
            })?;
        Ok(Outcome::Submitted)
    }

    /// Publishes the current log so progress is visible remotely.
    /// Nothing local is modified or deleted.
    fn mirror_progress(&self, descriptor: &JobDescriptor, log_file: &Path) -> Result<Outcome> {
        tracing::info!("Job {} still running, uploading log", descriptor.job_id);
        self.put_file(log_file)?;
        Ok(Outcome::ProgressMirrored)
    }

    fn archive_success(&self, descriptor: &JobDescriptor, run_dir: &Path) -> Result<Outcome> {
        tracing::info!("Job {} finished ({})", descriptor.job_id, run_dir.display());

        let archive = if self.config.archive {
            Some(
                self.archiver
                    .compress(run_dir)
                    .map_err(|source| SweepError::Archive {
                        path: run_dir.to_path_buf(),
                        source,
                    })?,
            )
        } else {
            None
        };

        self.put_file(&descriptor.descriptor_path)?;
        match &archive {
            Some(archive) => self.put_file(archive)?,
            None => self.put_dir(run_dir)?,
        }
        self.copy_to_durable_store(descriptor, run_dir, archive.as_deref())?;
        self.prune_intermediates(descriptor)?;
        self.put_dir(run_dir)?;

        // All uploads and copies are done; deletion comes last.
        tracing::info!("Cleaning up finished job {}", descriptor.job_id);
        self.remove_tree(run_dir)?;
        if let Some(archive) = &archive {
            self.remove_file(archive)?;
        }
        self.remove_file(&descriptor.descriptor_path)?;
        Ok(Outcome::Archived)
    }

    fn record_failure(
        &self,
        descriptor: &JobDescriptor,
        run_dir: &Path,
        log_file: &Path,
    ) -> Result<Outcome> {
        tracing::warn!("Job {} failed ({})", descriptor.job_id, run_dir.display());

        self.put_file(log_file)?;
        self.put_file(&descriptor.descriptor_path)?;
        // Postmortem copy; deliberately retained in the durable store.
        let durable = self.config.results_dir.join(&descriptor.job_id.0);
        self.copy_dir(run_dir, &durable)?;

        tracing::info!("Cleaning up failed job {}", descriptor.job_id);
        self.remove_tree(run_dir)?;
        self.remove_file(&descriptor.descriptor_path)?;
        Ok(Outcome::FailureRecorded)
    }

    fn copy_to_durable_store(
        &self,
        descriptor: &JobDescriptor,
        run_dir: &Path,
        archive: Option<&Path>,
    ) -> Result<()> {
        match archive {
            Some(archive) => {
                let dest = self.config.results_dir.join(format!(
                    "{}.tar.gz",
                    descriptor.job_id
                ));
                if self.fs.exists(&dest) {
                    tracing::warn!("{} exists, will not overwrite", dest.display());
                    return Ok(());
                }
                self.copy_file(archive, &dest)
            }
            None => {
                let dest = self.config.results_dir.join(&descriptor.job_id.0);
                self.copy_dir(run_dir, &dest)
            }
        }
    }

    fn prune_intermediates(&self, descriptor: &JobDescriptor) -> Result<()> {
        let results_dir = descriptor.results_dir();
        if !self.fs.exists(&results_dir) {
            return Ok(());
        }
        tracing::info!("Removing unnecessary intermediate files");
        let mut pruned = 0usize;
        for path in self
            .fs
            .list_dir(&results_dir)
            .map_err(|source| SweepError::List {
                path: results_dir.clone(),
                source,
            })?
        {
            let disposable = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| self.prune_rules.is_disposable(&self.config.pipeline, name));
            if disposable {
                self.remove_file(&path)?;
                pruned += 1;
            }
        }
        tracing::info!("Done removing {} intermediate files", pruned);
        Ok(())
    }

    fn put_file(&self, path: &Path) -> Result<()> {
        self.blobs
            .put_file(path, &self.config.container)
            .map_err(|source| SweepError::Upload {
                path: path.to_path_buf(),
                container: self.config.container.clone(),
                source,
            })
    }

    fn put_dir(&self, path: &Path) -> Result<()> {
        self.blobs
            .put_dir(path, &self.config.container)
            .map_err(|source| SweepError::Upload {
                path: path.to_path_buf(),
                container: self.config.container.clone(),
                source,
            })
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> Result<()> {
        self.fs
            .copy_file(src, dest)
            .map_err(|source| SweepError::Copy {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                source,
            })
    }

    fn copy_dir(&self, src: &Path, dest: &Path) -> Result<()> {
        self.fs
            .copy_dir(src, dest)
            .map_err(|source| SweepError::Copy {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                source,
            })
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.fs
            .remove_file(path)
            .map_err(|source| SweepError::Remove {
                path: path.to_path_buf(),
                source,
            })
    }

    fn remove_tree(&self, path: &Path) -> Result<()> {
        self.fs
            .remove_path(path)
            .map_err(|source| SweepError::Remove {
                path: path.to_path_buf(),
                source,
            })
    }
}

fn require<'a>(
    detection: &Detection,
    value: Option<&'a Path>,
    what: &'static str,
) -> Result<&'a Path> {
    value.ok_or(SweepError::IncompleteDetection {
        state: detection.state,
        what,
    })
}
