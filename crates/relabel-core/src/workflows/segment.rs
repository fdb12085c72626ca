use super::write_atomically;
use crate::core::models::chain::OutputChain;
use crate::engine::assignment::ChainAssignment;
use crate::engine::error::EngineError;
use crate::engine::outcome::{FileStage, Outcome, RewriteSummary, SegmentSummary, SkipReason};
use crate::engine::plan::SegmentPlan;
use crate::engine::rewrite::OutputStructure;
use crate::engine::sequencer::{ResidueArena, sequence_file};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Splits an already sequenced structure into its two output chains.
pub fn split(
    arena: &ResidueArena,
    plan: &SegmentPlan,
) -> Result<(OutputStructure, SegmentSummary), EngineError> {
    let ranges = plan.ranges(arena.len())?;
    debug!("Plan {} gives chain A {:?}, chain B {:?}", plan, ranges.a, ranges.b);

    let assignment = ChainAssignment::from_ranges(&ranges, arena.len());
    if assignment.dropped() > 0 {
        warn!(
            "{} residue(s) fall outside both chain ranges and will not be written",
            assignment.dropped()
        );
    }

    let structure = OutputStructure::build(arena, &assignment);
    let summary = SegmentSummary {
        residues: arena.len(),
        chain_a_residues: assignment.count(OutputChain::A),
        chain_b_residues: assignment.count(OutputChain::B),
        dropped_residues: assignment.dropped(),
        atoms_written: structure.atom_count(),
    };
    Ok((structure, summary))
}

/// Relabels one structure file into chains `A` (MHC + peptide) and `B`
/// (TCRα + TCRβ).
///
/// An existing `output` is never touched. No output is written unless the
/// whole file parses and the plan matches its residue count.
#[instrument(skip_all, name = "segment_workflow", fields(input = %input.display()))]
pub fn run(input: &Path, output: &Path, plan: &SegmentPlan) -> Outcome {
    if output.exists() {
        info!("Output already exists, skipping: {}", output.display());
        return Outcome::Skipped(SkipReason::OutputExists(output.to_path_buf()));
    }

    let mut stage = FileStage::Unprocessed;
    match relabel(input, output, plan, &mut stage) {
        Ok(summary) => Outcome::Rewritten(RewriteSummary::Segmented(summary)),
        Err(error) => {
            warn!("Relabeling failed after stage '{}': {}", stage, error);
            Outcome::Failed { stage, error }
        }
    }
}

fn relabel(
    input: &Path,
    output: &Path,
    plan: &SegmentPlan,
    stage: &mut FileStage,
) -> Result<SegmentSummary, EngineError> {
    let arena = sequence_file(input)?;
    *stage = FileStage::Parsed;

    let (structure, summary) = split(&arena, plan)?;
    *stage = FileStage::Segmented;

    write_atomically(output, |writer| structure.write_to(writer))?;
    info!(
        "Wrote {}: {} residue(s), chain A {}, chain B {}",
        output.display(),
        structure.residue_count(),
        summary.chain_a_residues,
        summary.chain_b_residues
    );
    Ok(summary)
}
