use jobsweep_core::gateway::FsGateway;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Local filesystem operations for the durable results store and
/// working-directory cleanup.
pub struct LocalFsGateway;

impl FsGateway for LocalFsGateway {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs_err::read_dir(dir)? {
            paths.push(entry?.path());
        }
        paths.sort();
        Ok(paths)
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> io::Result<()> {
        tracing::info!("Copying {} to {}", src.display(), dest.display());
        if let Some(parent) = dest.parent() {
            fs_err::create_dir_all(parent)?;
        }
        fs_err::copy(src, dest)?;
        Ok(())
    }

    fn copy_dir(&self, src: &Path, dest: &Path) -> io::Result<()> {
        if dest.exists() {
            tracing::warn!(
                "Folder {} exists, will not overwrite",
                dest.display()
            );
            return Ok(());
        }
        tracing::info!("Copying {} to {}", src.display(), dest.display());
        for entry in WalkDir::new(src) {
            let entry = entry.map_err(io::Error::from)?;
            let relative = entry
                .path()
                .strip_prefix(src)
                .map_err(io::Error::other)?;
            let target = dest.join(relative);
            if entry.file_type().is_dir() {
                fs_err::create_dir_all(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    fs_err::create_dir_all(parent)?;
                }
                fs_err::copy(entry.path(), &target)?;
            }
        }
        tracing::info!("Done copying {} to {}", src.display(), dest.display());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            tracing::warn!("{} does not exist, nothing to remove", path.display());
            return Ok(());
        }
        tracing::info!("Removing {}", path.display());
        fs_err::remove_file(path)
    }

    fn remove_path(&self, path: &Path) -> io::Result<()> {
        tracing::info!("Removing {}", path.display());
        if path.is_dir() {
            fs_err::remove_dir_all(path)
        } else {
            fs_err::remove_file(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_copy_dir_is_recursive() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("job7");
        fs::create_dir_all(src.join("results")).unwrap();
        fs::write(src.join("run_LOG.txt"), "log").unwrap();
        fs::write(src.join("results").join("output.txt"), "data").unwrap();

        let dest = tmp.path().join("durable").join("job7");
        LocalFsGateway.copy_dir(&src, &dest).unwrap();
        assert!(dest.join("run_LOG.txt").exists());
        assert!(dest.join("results").join("output.txt").exists());
    }

    #[test]
    fn test_copy_dir_skips_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("job7");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("new.txt"), "new").unwrap();

        let dest = tmp.path().join("durable");
        fs::create_dir_all(&dest).unwrap();
        LocalFsGateway.copy_dir(&src, &dest).unwrap();
        assert!(!dest.join("new.txt").exists());
    }

    #[test]
    fn test_remove_missing_file_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(LocalFsGateway
            .remove_file(&tmp.path().join("gone.json"))
            .is_ok());
    }

    #[test]
    fn test_remove_path_handles_both_kinds() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("job7");
        fs::create_dir_all(dir.join("results")).unwrap();
        let file = tmp.path().join("job7.json");
        fs::write(&file, "{}").unwrap();

        LocalFsGateway.remove_path(&dir).unwrap();
        LocalFsGateway.remove_path(&file).unwrap();
        assert!(!dir.exists());
        assert!(!file.exists());
    }
}
