use crate::cli::{PlanSource, SegmentArgs, SegmentBatchArgs};
use crate::error::{CliError, Result};
use crate::targets;
use crate::utils::files;
use relabel::engine::error::EngineError;
use relabel::engine::outcome::Outcome;
use relabel::engine::plan::SegmentPlan;
use relabel::engine::progress::ProgressReporter;
use relabel::workflows::{self, batch::SegmentJob};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn resolve_plan(source: &PlanSource) -> Result<SegmentPlan> {
    match (&source.targets_tsv, &source.lengths) {
        (Some(path), _) => targets::load_plan(path),
        (None, Some(lengths)) => Ok(SegmentPlan::from_lengths(lengths)?),
        (None, None) => Err(CliError::Argument(
            "either --targets-tsv or --lengths is required".to_string(),
        )),
    }
}

pub async fn run(args: SegmentArgs) -> Result<()> {
    let plan = resolve_plan(&args.plan)?;
    info!("Relabeling {:?} with plan {}", &args.input, plan);

    let outcome =
        tokio::task::block_in_place(|| workflows::segment::run(&args.input, &args.output, &plan));

    println!("{}: {}", args.input.display(), outcome);
    match outcome {
        Outcome::Failed { error, .. } => Err(error.into()),
        _ => Ok(()),
    }
}

/// Pairs every model with `<targets_dir>/<run prefix>.tsv`. A model whose
/// targets file is missing or unreadable becomes a failed job, not a fatal error.
fn plan_jobs(models: Vec<PathBuf>, targets_dir: &Path, output_dir: &Path) -> Vec<SegmentJob> {
    models
        .into_iter()
        .map(|input| {
            let output = files::output_path_for(&input, output_dir);
            let plan = match targets::targets_path_for(&input, targets_dir) {
                Some(path) if path.is_file() => targets::load_plan(&path).map_err(|e| match e {
                    CliError::Relabel(inner) => inner,
                    other => EngineError::InvalidPlan(other.to_string()),
                }),
                Some(path) => Err(EngineError::InvalidPlan(format!(
                    "targets file {} not found",
                    path.display()
                ))),
                None => Err(EngineError::InvalidPlan(format!(
                    "cannot derive a run prefix from {}",
                    input.display()
                ))),
            };
            if let Err(e) = &plan {
                warn!("{}: {}", input.display(), e);
            }
            SegmentJob {
                input,
                output,
                plan,
            }
        })
        .collect()
}

pub async fn run_batch(args: SegmentBatchArgs, quiet: bool) -> Result<()> {
    let models = files::collect_pdb_files(&args.input_dir)?;
    if models.is_empty() {
        warn!("No PDB files found in {:?}", &args.input_dir);
        println!("No PDB files found in {}.", args.input_dir.display());
        return Ok(());
    }
    info!("Found {} model(s) in {:?}", models.len(), &args.input_dir);

    let jobs = plan_jobs(models, &args.targets_dir, &args.output_dir);

    let progress_handler = super::progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let summary =
        tokio::task::block_in_place(|| workflows::batch::run_segment_batch(jobs, &reporter));
    super::finish(&summary)
}
