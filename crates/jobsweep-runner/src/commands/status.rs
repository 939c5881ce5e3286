use crate::error::CliError;
use colored::Colorize;
use jobsweep_client::discover_descriptors;
use jobsweep_core::config::Config;
use jobsweep_core::detect::detect;
use jobsweep_core::model::LifecycleState;

/// Read-only view: detection without any action sequence.
pub fn handle_status(config: &Config) -> Result<(), CliError> {
    let descriptors = discover_descriptors(&config.work_dir)?;
    if descriptors.is_empty() {
        println!("No job descriptors in {}.", config.work_dir.display());
        return Ok(());
    }

    for descriptor in descriptors {
        match detect(&descriptor) {
            Ok(detection) => {
                println!(
                    "{:<30} {}",
                    descriptor.job_id.to_string(),
                    paint_state(detection.state)
                );
            }
            Err(err) => {
                println!(
                    "{:<30} {} ({})",
                    descriptor.job_id.to_string(),
                    "anomaly".yellow().bold(),
                    err
                );
            }
        }
    }
    Ok(())
}

fn paint_state(state: LifecycleState) -> String {
    let text = state.to_string();
    match state {
        LifecycleState::Unsubmitted => text.dimmed().to_string(),
        LifecycleState::Queued => text.cyan().to_string(),
        LifecycleState::Running => text.blue().to_string(),
        LifecycleState::Succeeded => text.green().bold().to_string(),
        LifecycleState::Failed => text.red().bold().to_string(),
    }
}
