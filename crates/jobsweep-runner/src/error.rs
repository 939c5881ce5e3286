use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] jobsweep_core::errors::ConfigError),

    #[error(transparent)]
    Sweep(#[from] jobsweep_client::SweepError),
}
