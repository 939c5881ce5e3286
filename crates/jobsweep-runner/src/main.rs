mod cli;
mod commands;
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use error::CliError;
use jobsweep_core::config::Config;
use jobsweep_core::logging::{self, LogLevel};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let prune_rules = config.prune_rules()?;
    // Fatal before any job is touched.
    config.validate(&prune_rules)?;
    logging::init(&config.log_dir, LogLevel::from_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Sweep => commands::sweep::handle_sweep(&config, prune_rules),
        Commands::Status => commands::status::handle_status(&config),
    }
}
