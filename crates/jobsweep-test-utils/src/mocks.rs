use jobsweep_core::gateway::{Archiver, BlobStore, Scheduler};
use jobsweep_core::model::{JobDescriptor, JobId};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Records submissions and writes the wrapper script so the
/// "already submitted" guard behaves as in production.
#[derive(Default)]
pub struct RecordingScheduler {
    pub submissions: Mutex<Vec<JobId>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().expect("mutex poisoned").len()
    }
}

impl Scheduler for RecordingScheduler {
    fn submit(&self, descriptor: &JobDescriptor, _work_dir: &Path) -> io::Result<()> {
        std::fs::write(descriptor.wrapper_path(), "#!/bin/bash\n")?;
        self.submissions
            .lock()
            .expect("mutex poisoned")
            .push(descriptor.job_id.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPut {
    pub local: PathBuf,
    pub container: String,
    pub recursive: bool,
    /// Relative paths under `local` at the moment of a recursive put.
    /// Uploads are observed by name only, so this snapshot is the only
    /// way to assert what a mirror contained at upload time.
    pub files: Vec<String>,
}

/// Records every put; optionally starts failing after `fail_after`
/// successful ones, to exercise mid-sequence abort behavior.
#[derive(Default)]
pub struct RecordingBlobStore {
    pub puts: Mutex<Vec<RecordedPut>>,
    fail_after: Option<usize>,
}

impl RecordingBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(fail_after: usize) -> Self {
        Self {
            puts: Mutex::new(Vec::new()),
            fail_after: Some(fail_after),
        }
    }

    pub fn put_count(&self) -> usize {
        self.puts.lock().expect("mutex poisoned").len()
    }

    pub fn recorded(&self) -> Vec<RecordedPut> {
        self.puts.lock().expect("mutex poisoned").clone()
    }

    fn put(&self, local: &Path, container: &str, recursive: bool) -> io::Result<()> {
        let mut puts = self.puts.lock().expect("mutex poisoned");
        if let Some(limit) = self.fail_after {
            if puts.len() >= limit {
                return Err(io::Error::other("injected upload failure"));
            }
        }
        let files = if recursive {
            let mut files = Vec::new();
            snapshot_files(local, local, &mut files)?;
            files.sort();
            files
        } else {
            Vec::new()
        };
        puts.push(RecordedPut {
            local: local.to_path_buf(),
            container: container.to_string(),
            recursive,
            files,
        });
        Ok(())
    }
}

fn snapshot_files(root: &Path, dir: &Path, files: &mut Vec<String>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            snapshot_files(root, &path, files)?;
        } else if let Ok(rel) = path.strip_prefix(root) {
            files.push(rel.to_string_lossy().into_owned());
        }
    }
    Ok(())
}

impl BlobStore for RecordingBlobStore {
    fn put_file(&self, local: &Path, container: &str) -> io::Result<()> {
        self.put(local, container, false)
    }

    fn put_dir(&self, local: &Path, container: &str) -> io::Result<()> {
        self.put(local, container, true)
    }
}

/// Writes a placeholder archive next to the source directory, skipping
/// an existing one exactly like the production tar gateway.
#[derive(Default)]
pub struct RecordingArchiver {
    pub compressed: Mutex<Vec<PathBuf>>,
}

impl RecordingArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compress_count(&self) -> usize {
        self.compressed.lock().expect("mutex poisoned").len()
    }
}

impl Archiver for RecordingArchiver {
    fn compress(&self, source_dir: &Path) -> io::Result<PathBuf> {
        let mut archive = source_dir.to_path_buf().into_os_string();
        archive.push(".tar.gz");
        let archive = PathBuf::from(archive);
        if !archive.exists() {
            std::fs::write(&archive, "tar.gz placeholder")?;
            self.compressed
                .lock()
                .expect("mutex poisoned")
                .push(archive.clone());
        }
        Ok(archive)
    }
}
