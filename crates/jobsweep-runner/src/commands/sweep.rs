use crate::error::CliError;
use colored::Colorize;
use jobsweep_client::gateways::{LocalFsGateway, QsubScheduler, S3CliStore, TarArchiver};
use jobsweep_client::{run_pass, Orchestrator, PassSummary};
use jobsweep_core::config::Config;
use jobsweep_core::prune::PruneRules;
use std::sync::Arc;

pub fn handle_sweep(config: &Config, prune_rules: PruneRules) -> Result<(), CliError> {
    let orchestrator = Orchestrator::new(
        config.clone(),
        prune_rules,
        Arc::new(QsubScheduler::from_config(config)),
        Arc::new(S3CliStore),
        Arc::new(TarArchiver),
        Arc::new(LocalFsGateway),
    );

    let summary = run_pass(&orchestrator)?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &PassSummary) {
    println!(
        "Pass complete: {} descriptor(s) processed.",
        summary.discovered.to_string().bold()
    );
    let rows = [
        ("submitted", summary.submitted),
        ("already submitted", summary.already_submitted),
        ("queued", summary.queued),
        ("running", summary.running),
        ("archived", summary.archived),
        ("failures recorded", summary.failures_recorded),
    ];
    for (label, count) in rows {
        if count > 0 {
            println!("  {:>3} {}", count, label);
        }
    }
    if summary.skipped > 0 {
        println!(
            "  {:>3} {}",
            summary.skipped,
            "skipped (structural anomaly, see log)".yellow()
        );
    }
    if summary.aborted > 0 {
        println!(
            "  {:>3} {}",
            summary.aborted,
            "aborted mid-sequence (will retry next pass)".red()
        );
    }
}
