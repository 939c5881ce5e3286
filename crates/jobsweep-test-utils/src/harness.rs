use jobsweep_core::config::Config;
use jobsweep_core::model::JobDescriptor;
use std::fs;
use std::path::PathBuf;

/// Fabricates the filesystem artifacts an external scheduler would
/// leave behind: descriptors, run directories, logs and results, all
/// inside one temporary root with work/results/log directories.
pub struct WorkDirHarness {
    pub _temp_dir: tempfile::TempDir,
    pub work_dir: PathBuf,
    pub results_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl WorkDirHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::Builder::new()
            .prefix("jobsweep-test-")
            .tempdir()
            .expect("Failed to create temp dir");
        let root = temp_dir.path();

        let work_dir = root.join("work_dir");
        let results_dir = root.join("results_dir");
        let log_dir = root.join("logs");
        fs::create_dir_all(&work_dir).expect("Failed to create work dir");
        fs::create_dir_all(&results_dir).expect("Failed to create results dir");
        fs::create_dir_all(&log_dir).expect("Failed to create log dir");

        Self {
            _temp_dir: temp_dir,
            work_dir,
            results_dir,
            log_dir,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            work_dir: self.work_dir.clone(),
            results_dir: self.results_dir.clone(),
            log_dir: self.log_dir.clone(),
            ..Config::default()
        }
    }

    pub fn add_descriptor(&self, job_id: &str) -> JobDescriptor {
        let path = self.work_dir.join(format!("{}.json", job_id));
        fs::write(&path, "{}").expect("Failed to write descriptor");
        JobDescriptor::from_path(&path).expect("Descriptor path must have a stem")
    }

    pub fn add_wrapper(&self, descriptor: &JobDescriptor) {
        fs::write(descriptor.wrapper_path(), "#!/bin/bash\n").expect("Failed to write wrapper");
    }

    /// Simulates the scheduler starting the job: run directory with an
    /// empty results directory and a log holding `log_lines`.
    pub fn start_run(&self, descriptor: &JobDescriptor, log_lines: &[&str]) -> PathBuf {
        fs::create_dir_all(descriptor.results_dir()).expect("Failed to create results dir");
        let log = descriptor.run_dir().join("run_LOG.txt");
        fs::write(&log, log_lines.join("\n")).expect("Failed to write log");
        log
    }

    pub fn add_result(&self, descriptor: &JobDescriptor, name: &str) {
        fs::write(descriptor.results_dir().join(name), "data").expect("Failed to write result");
    }
}

impl Default for WorkDirHarness {
    fn default() -> Self {
        Self::new()
    }
}
