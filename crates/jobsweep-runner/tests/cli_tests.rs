#![allow(dead_code)]

use assert_cmd::Command as AssertCommand;
use jobsweep_test_utils::harness::WorkDirHarness;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

struct CliHarness {
    work: WorkDirHarness,
    bin_dir: PathBuf,
}

impl CliHarness {
    fn new() -> Self {
        let work = WorkDirHarness::new();
        let bin_dir = work
            .work_dir
            .parent()
            .expect("harness work dir has a parent")
            .join("bin");
        fs::create_dir_all(&bin_dir).unwrap();
        Self { work, bin_dir }
    }

    /// Drops a no-op `qsub` onto the PATH so submission sequences can run
    /// without a real scheduler.
    fn stub_qsub(&self) {
        self.stub_tool("qsub", "#!/bin/sh\necho stub-job-id\nexit 0\n");
    }

    fn stub_tool(&self, name: &str, script: &str) {
        let path = self.bin_dir.join(name);
        fs::write(&path, script).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    fn cmd(&self) -> AssertCommand {
        let mut cmd = AssertCommand::new(env!("CARGO_BIN_EXE_jobsweep"));
        let path = format!(
            "{}:{}",
            self.bin_dir.display(),
            std::env::var("PATH").unwrap_or_default()
        );
        cmd.env("PATH", path);
        cmd.env("RUST_BACKTRACE", "1");
        cmd.env("NO_COLOR", "1");
        cmd.arg("--work-dir").arg(&self.work.work_dir);
        cmd.arg("--results-dir").arg(&self.work.results_dir);
        cmd.arg("--log-dir").arg(&self.work.log_dir);
        cmd
    }
}

#[test]
fn sweep_fails_when_work_dir_is_missing() {
    let harness = CliHarness::new();
    fs::remove_dir_all(&harness.work.work_dir).unwrap();

    harness
        .cmd()
        .arg("sweep")
        .assert()
        .failure()
        .stderr(predicates::str::contains("does not exist"));
}

#[test]
fn sweep_over_empty_work_dir_succeeds() {
    let harness = CliHarness::new();

    harness
        .cmd()
        .arg("sweep")
        .assert()
        .success()
        .stdout(predicates::str::contains("0 descriptor(s) processed"));
}

#[test]
fn unknown_pipeline_is_rejected_before_any_work() {
    let harness = CliHarness::new();
    harness.work.add_descriptor("job1");

    harness
        .cmd()
        .arg("--pipeline")
        .arg("nonesuch")
        .arg("sweep")
        .assert()
        .failure()
        .stderr(predicates::str::contains("Unknown pipeline 'nonesuch'"));

    // Validation failed up front, so no wrapper was written.
    assert!(!harness.work.work_dir.join("job1.json.sh").exists());
}

#[test]
fn status_reports_a_fresh_descriptor_as_unsubmitted() {
    let harness = CliHarness::new();
    harness.work.add_descriptor("job1");

    harness
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicates::str::contains("job1").and(predicates::str::contains("unsubmitted")));
}

#[test]
fn status_on_empty_work_dir_says_so() {
    let harness = CliHarness::new();

    harness
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicates::str::contains("No job descriptors in"));
}

#[test]
fn sweep_submits_new_jobs_and_is_idempotent() {
    let harness = CliHarness::new();
    harness.stub_qsub();
    harness.work.add_descriptor("job1");

    harness
        .cmd()
        .arg("sweep")
        .assert()
        .success()
        .stdout(predicates::str::contains("1 submitted"));

    assert!(harness.work.work_dir.join("job1.json.sh").exists());

    // Second pass sees the wrapper and leaves the job alone.
    harness
        .cmd()
        .arg("sweep")
        .assert()
        .success()
        .stdout(predicates::str::contains("1 already submitted"));
}

#[test]
fn sweep_leaves_queued_jobs_untouched() {
    let harness = CliHarness::new();
    let descriptor = harness.work.add_descriptor("job1");
    harness.work.add_wrapper(&descriptor);
    // Run directory exists but the scheduler has not started the job yet.
    fs::create_dir_all(descriptor.run_dir()).unwrap();

    harness
        .cmd()
        .arg("sweep")
        .assert()
        .success()
        .stdout(predicates::str::contains("1 queued"));

    assert!(descriptor.descriptor_path.exists());
    assert!(descriptor.run_dir().exists());
}
