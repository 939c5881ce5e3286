use jobsweep_core::gateway::Archiver;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Compresses a run directory into `<run_dir>.tar.gz` with the system
/// tar. An existing archive is reused, never overwritten, which makes
/// a crashed pass safe to resume.
pub struct TarArchiver;

impl Archiver for TarArchiver {
    fn compress(&self, source_dir: &Path) -> io::Result<PathBuf> {
        let mut archive = source_dir.to_path_buf().into_os_string();
        archive.push(".tar.gz");
        let archive = PathBuf::from(archive);

        if archive.exists() {
            tracing::info!("{} exists, will not overwrite", archive.display());
            return Ok(archive);
        }

        let dir_name = source_dir.file_name().ok_or_else(|| {
            io::Error::other(format!(
                "Cannot archive '{}': no directory name",
                source_dir.display()
            ))
        })?;
        let parent = source_dir.parent().unwrap_or_else(|| Path::new("."));

        tracing::info!("Making tar file {} (may take a while)", archive.display());
        let output = Command::new("tar")
            .arg("-czf")
            .arg(&archive)
            .arg("-C")
            .arg(parent)
            .arg(dir_name)
            .output()?;
        if !output.status.success() {
            // Drop the partial archive so the next pass starts clean.
            let _ = fs_err::remove_file(&archive);
            return Err(io::Error::other(format!(
                "tar failed for {}: {}",
                source_dir.display(),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        tracing::info!("Done writing tar file {}", archive.display());
        Ok(archive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_compress_creates_sibling_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let run_dir = tmp.path().join("job7");
        fs::create_dir_all(run_dir.join("results")).unwrap();
        fs::write(run_dir.join("results").join("output.txt"), "data").unwrap();

        let archive = TarArchiver.compress(&run_dir).unwrap();
        assert_eq!(archive, tmp.path().join("job7.tar.gz"));
        assert!(archive.exists());
    }

    #[test]
    fn test_compress_does_not_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let run_dir = tmp.path().join("job7");
        fs::create_dir_all(&run_dir).unwrap();
        let existing = tmp.path().join("job7.tar.gz");
        fs::write(&existing, "sentinel").unwrap();

        let archive = TarArchiver.compress(&run_dir).unwrap();
        assert_eq!(archive, existing);
        assert_eq!(fs::read_to_string(&existing).unwrap(), "sentinel");
    }
}
