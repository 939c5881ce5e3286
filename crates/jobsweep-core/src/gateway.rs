use crate::model::JobDescriptor;
use std::io;
use std::path::{Path, PathBuf};

// The four external collaborators the orchestrator sequences. Each is
// a separate seam so tests can substitute one without faking the
// others. Implementations report plain `io::Error`; the caller wraps
// those with step context.

pub trait Scheduler {
    /// Submits the job to the compute cluster. The side effect is the
    /// creation of an execution wrapper script; callers treat an
    /// existing wrapper as "already submitted" and must not call this
    /// again for the same descriptor.
    fn submit(&self, descriptor: &JobDescriptor, work_dir: &Path) -> io::Result<()>;
}

pub trait BlobStore {
    fn put_file(&self, local: &Path, container: &str) -> io::Result<()>;
    fn put_dir(&self, local: &Path, container: &str) -> io::Result<()>;
}

pub trait Archiver {
    /// Compresses `source_dir` into a sibling archive and returns its
    /// path. Must not overwrite an archive that already exists.
    fn compress(&self, source_dir: &Path) -> io::Result<PathBuf>;
}

pub trait FsGateway {
    fn exists(&self, path: &Path) -> bool;
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
    fn copy_file(&self, src: &Path, dest: &Path) -> io::Result<()>;
    /// Recursive copy of `src` into `dest` (the new directory itself,
    /// not a parent). Skips with a warning when `dest` already exists.
    fn copy_dir(&self, src: &Path, dest: &Path) -> io::Result<()>;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
    /// Removes a file or a directory tree, whichever `path` is.
    fn remove_path(&self, path: &Path) -> io::Result<()>;
}
