use crate::constants::pipelines;
use crate::errors::ConfigError;
use crate::prune::PruneRules;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Shared directory holding descriptors, wrappers and run dirs.
    pub work_dir: PathBuf,
    /// Durable local store retained after working-directory cleanup.
    pub results_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Remote container (bucket) for uploads.
    pub container: String,
    /// Active pipeline; selects the intermediate-pruning rule set.
    pub pipeline: String,
    /// Compress run directories before upload/copy on success.
    pub archive: bool,
    /// Extra prune rule sets: pipeline id -> filename-suffix patterns.
    pub pipelines: HashMap<String, Vec<String>>,
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Environment module loaded by the wrapper; defaults to the
    /// active pipeline name when unset.
    pub module: Option<String>,
    pub nodes: u32,
    pub ppn: u32,
    pub walltime: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            module: None,
            nodes: 1,
            ppn: 8,
            walltime: "72:00:00".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("work_dir"),
            results_dir: PathBuf::from("results_dir"),
            log_dir: PathBuf::from("logs"),
            container: "metadata-results".to_string(),
            pipeline: pipelines::DROPSEQTOOLS.to_string(),
            archive: false,
            pipelines: HashMap::new(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content =
                    fs_err::read_to_string(path).map_err(|source| ConfigError::PathIo {
                        path: path.to_path_buf(),
                        source,
                    })?;
                toml::from_str(&content)?
            }
            None => Self::default(),
        };
        config.work_dir = expand_tilde(&config.work_dir);
        config.results_dir = expand_tilde(&config.results_dir);
        config.log_dir = expand_tilde(&config.log_dir);
        Ok(config)
    }

    pub fn prune_rules(&self) -> Result<PruneRules, ConfigError> {
        PruneRules::with_overrides(&self.pipelines)
    }

    /// Startup validation; any error here is fatal before the first
    /// job is touched.
    pub fn validate(&self, rules: &PruneRules) -> Result<(), ConfigError> {
        require_dir("working", &self.work_dir)?;
        require_dir("results", &self.results_dir)?;
        require_dir("log", &self.log_dir)?;
        if !rules.knows(&self.pipeline) {
            return Err(ConfigError::UnknownPipeline {
                name: self.pipeline.clone(),
                known: rules.known_pipelines(),
            });
        }
        Ok(())
    }

    pub fn scheduler_module(&self) -> &str {
        self.scheduler.module.as_deref().unwrap_or(&self.pipeline)
    }
}

fn require_dir(role: &'static str, path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::DirectoryMissing {
            role,
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Err(ConfigError::NotADirectory {
            role,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
