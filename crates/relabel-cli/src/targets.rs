use crate::error::{CliError, Result};
use relabel::engine::plan::SegmentPlan;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const TARGETS_EXTENSION: &str = "tsv";
const RUN_MARKER: &str = "_run_";

#[derive(Debug, Deserialize)]
struct TargetRow {
    target_chainseq: String,
}

/// Reads the segment plan from the first data row of a targets TSV.
/// Other columns are ignored.
pub fn load_plan(path: &Path) -> Result<SegmentPlan> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)
        .map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

    let row: TargetRow = reader
        .deserialize::<TargetRow>()
        .next()
        .ok_or_else(|| CliError::FileParsing {
            path: path.to_path_buf(),
            source: anyhow::anyhow!("no data rows"),
        })?
        .map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

    let plan = SegmentPlan::from_chainseq(row.target_chainseq.trim())?;
    debug!("Loaded plan {} from {:?}", plan, path);
    Ok(plan)
}

/// The run prefix of a relaxed model's file stem, `10839` for
/// `10839_run_model_2_ptm_relaxed`. Stems without a run marker are their own prefix.
pub fn run_prefix(stem: &str) -> &str {
    stem.split_once(RUN_MARKER)
        .map_or(stem, |(prefix, _)| prefix)
}

/// Targets file for the model at `model_path` inside `targets_dir`.
pub fn targets_path_for(model_path: &Path, targets_dir: &Path) -> Option<std::path::PathBuf> {
    let stem = model_path.file_stem()?.to_str()?;
    Some(targets_dir.join(format!("{}.{}", run_prefix(stem), TARGETS_EXTENSION)))
}
