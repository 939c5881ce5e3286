use jobsweep_core::gateway::BlobStore;
use std::io;
use std::path::Path;
use std::process::Command;

/// Blob store backed by the `aws s3 cp` CLI. Every failed upload maps
/// to a plain I/O error that the orchestrator treats as transient.
pub struct S3CliStore;

impl S3CliStore {
    fn container_url(container: &str) -> String {
        if container.starts_with("s3://") {
            container.to_string()
        } else {
            format!("s3://{}", container)
        }
    }

    fn run_cp(args: &[&str]) -> io::Result<()> {
        let output = Command::new("aws").args(["s3", "cp"]).args(args).output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "aws s3 cp {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr)
            )));
        }
        Ok(())
    }

    fn leaf_name(local: &Path) -> io::Result<&str> {
        local
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                io::Error::other(format!("Path '{}' has no usable filename", local.display()))
            })
    }
}

impl BlobStore for S3CliStore {
    fn put_file(&self, local: &Path, container: &str) -> io::Result<()> {
        let dest = format!(
            "{}/{}",
            Self::container_url(container),
            Self::leaf_name(local)?
        );
        tracing::info!("Uploading {} to {}", local.display(), dest);
        Self::run_cp(&[&local.to_string_lossy(), &dest])?;
        tracing::info!("Done uploading {}", local.display());
        Ok(())
    }

    fn put_dir(&self, local: &Path, container: &str) -> io::Result<()> {
        let dest = format!(
            "{}/{}/",
            Self::container_url(container),
            Self::leaf_name(local)?
        );
        tracing::info!("Uploading {} recursively to {}", local.display(), dest);
        Self::run_cp(&[&local.to_string_lossy(), &dest, "--recursive"])?;
        tracing::info!("Done uploading {}", local.display());
        Ok(())
    }
}
