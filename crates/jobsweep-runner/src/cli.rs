use clap::{Parser, Subcommand};
use jobsweep_core::config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jobsweep",
    version,
    about = "Sweeps a working directory of batch jobs: submits new ones, mirrors running ones, archives finished ones.",
    long_about = "Reads job descriptors (*.json) from a shared working directory, infers each \
                  job's state from the artifacts the cluster scheduler left behind, and runs the \
                  matching submit/upload/archive/cleanup sequence. Meant to be invoked \
                  periodically; every pass is safe to re-run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Path to a jobsweep.toml configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Working directory holding job descriptors")]
    pub work_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Durable local results store")]
    pub results_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory for the status log")]
    pub log_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Remote container (bucket) for uploads")]
    pub container: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Active pipeline; selects which intermediate files are pruned"
    )]
    pub pipeline: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Compress run directories into tarballs before upload and copy"
    )]
    pub archive: bool,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase verbosity level (-v for debug, -vv for trace)")]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run one pass over the working directory")]
    Sweep,

    #[command(about = "Detect and print every job's state without acting on it")]
    Status,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(work_dir) = &self.work_dir {
            config.work_dir = work_dir.clone();
        }
        if let Some(results_dir) = &self.results_dir {
            config.results_dir = results_dir.clone();
        }
        if let Some(log_dir) = &self.log_dir {
            config.log_dir = log_dir.clone();
        }
        if let Some(container) = &self.container {
            config.container = container.clone();
        }
        if let Some(pipeline) = &self.pipeline {
            config.pipeline = pipeline.clone();
        }
        if self.archive {
            config.archive = true;
        }
    }
}
