pub mod remap;
pub mod segment;

use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use relabel::workflows::batch::BatchSummary;
use tracing::{error, info};

fn progress_handler(quiet: bool) -> CliProgressHandler {
    if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    }
}

/// Prints the per-run tally and turns any failed file into a non-zero exit.
fn finish(summary: &BatchSummary) -> Result<()> {
    for report in summary.failures() {
        error!("{}", report);
    }

    let total = summary.reports.len();
    println!(
        "Processed {} file(s): {} rewritten, {} skipped, {} failed.",
        total,
        summary.rewritten(),
        summary.skipped(),
        summary.failed()
    );
    info!("Batch summary printed for {} file(s).", total);

    match summary.failed() {
        0 => Ok(()),
        failed => Err(CliError::BatchFailed { failed, total }),
    }
}
