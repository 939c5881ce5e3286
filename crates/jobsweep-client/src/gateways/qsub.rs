use jobsweep_core::config::Config;
use jobsweep_core::gateway::Scheduler;
use jobsweep_core::model::JobDescriptor;
use std::io;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;

/// Submits jobs to a PBS/Torque queue. The generated wrapper script is
/// also the on-disk "already submitted" marker, so submission is never
/// attempted when the wrapper exists.
pub struct QsubScheduler {
    module: String,
    nodes: u32,
    ppn: u32,
    walltime: String,
}

impl QsubScheduler {
    pub fn from_config(config: &Config) -> Self {
        Self {
            module: config.scheduler_module().to_string(),
            nodes: config.scheduler.nodes,
            ppn: config.scheduler.ppn,
            walltime: config.scheduler.walltime.clone(),
        }
    }

    fn wrapper_script(&self, descriptor_name: &str, job_name: &str, work_dir: &Path) -> String {
        format!(
            "#!/bin/bash\n\
             #PBS -N {job_name}\n\
             #PBS -l nodes={nodes}:ppn={ppn}\n\
             #PBS -l walltime={walltime}\n\
             source ~/.bashrc\n\
             module load {module}\n\
             cd {work_dir}\n\
             ./{descriptor_name}\n",
            job_name = job_name,
            nodes = self.nodes,
            ppn = self.ppn,
            walltime = self.walltime,
            module = self.module,
            work_dir = work_dir.display(),
            descriptor_name = descriptor_name,
        )
    }
}

impl Scheduler for QsubScheduler {
    fn submit(&self, descriptor: &JobDescriptor, work_dir: &Path) -> io::Result<()> {
        let descriptor_name = descriptor
            .descriptor_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                io::Error::other(format!(
                    "Descriptor path '{}' has no usable filename",
                    descriptor.descriptor_path.display()
                ))
            })?;

        let wrapper = descriptor.wrapper_path();
        tracing::info!("Creating submission script {}", wrapper.display());
        fs_err::write(
            &wrapper,
            self.wrapper_script(descriptor_name, &descriptor.job_id.0, work_dir),
        )?;
        fs_err::set_permissions(&wrapper, std::fs::Permissions::from_mode(0o755))?;

        let output = Command::new("qsub")
            .arg(&wrapper)
            .current_dir(work_dir)
            .output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "qsub failed for {}: {}",
                wrapper.display(),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let queue_id = String::from_utf8_lossy(&output.stdout);
        tracing::info!(
            "Submitted job {} to queue ({})",
            descriptor.job_id,
            queue_id.trim()
        );
        Ok(())
    }
}
