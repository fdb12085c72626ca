use super::error::EngineError;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Where a file was in its pipeline. Terminal stages are carried by [`Outcome`];
/// the intermediate ones tell a failure report how far processing got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStage {
    Unprocessed,
    Parsed,
    Segmented,
    SetChecked,
}

impl fmt::Display for FileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unprocessed => "unprocessed",
            Self::Parsed => "parsed",
            Self::Segmented => "segmented",
            Self::SetChecked => "set-checked",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSummary {
    pub residues: usize,
    pub chain_a_residues: usize,
    pub chain_b_residues: usize,
    pub dropped_residues: usize,
    pub atoms_written: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapSummary {
    pub observed: BTreeSet<char>,
    pub lines_substituted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteSummary {
    Segmented(SegmentSummary),
    Remapped(RemapSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The destination already exists and is left exactly as found.
    OutputExists(PathBuf),
    /// Not every required chain was present; the input was copied unchanged.
    CriteriaNotMet {
        observed: BTreeSet<char>,
        missing: BTreeSet<char>,
    },
}

#[derive(Debug)]
pub enum Outcome {
    Rewritten(RewriteSummary),
    Skipped(SkipReason),
    Failed { stage: FileStage, error: EngineError },
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rewritten(_) => "rewritten",
            Self::Skipped(_) => "skipped",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

fn chain_list(chains: &BTreeSet<char>) -> String {
    chains.iter().collect()
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rewritten(RewriteSummary::Segmented(s)) => write!(
                f,
                "rewritten: {} residues -> chain A {}, chain B {} ({} dropped, {} atoms)",
                s.residues, s.chain_a_residues, s.chain_b_residues, s.dropped_residues,
                s.atoms_written
            ),
            Self::Rewritten(RewriteSummary::Remapped(s)) => write!(
                f,
                "rewritten: chains [{}], {} atom lines relabeled",
                chain_list(&s.observed),
                s.lines_substituted
            ),
            Self::Skipped(SkipReason::OutputExists(path)) => {
                write!(f, "skipped: output already exists ({})", path.display())
            }
            Self::Skipped(SkipReason::CriteriaNotMet { observed, missing }) => write!(
                f,
                "skipped: copied unchanged, chains [{}] lack [{}]",
                chain_list(observed),
                chain_list(missing)
            ),
            Self::Failed { stage, error } => {
                write!(f, "failed ({}, after {}): {}", error.category(), stage, error)
            }
        }
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: Outcome,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.input.display(), self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_not_met_is_a_skip_not_a_failure() {
        let outcome = Outcome::Skipped(SkipReason::CriteriaNotMet {
            observed: BTreeSet::from(['A', 'B', 'C', 'D']),
            missing: BTreeSet::from(['E']),
        });
        assert_eq!(outcome.label(), "skipped");
        assert!(!outcome.is_failure());
        assert!(outcome.to_string().contains("lack [E]"));
    }

    #[test]
    fn failure_display_names_stage_and_precondition() {
        let outcome = Outcome::Failed {
            stage: FileStage::Parsed,
            error: EngineError::SegmentMismatch {
                declared: 40,
                observed: 41,
            },
        };
        assert!(outcome.is_failure());
        let text = outcome.to_string();
        assert!(text.starts_with("failed (segment-mismatch, after parsed)"));
    }

    #[test]
    fn report_prefixes_input_path() {
        let report = FileReport {
            input: PathBuf::from("in/model.pdb"),
            output: PathBuf::from("out/model.pdb"),
            outcome: Outcome::Skipped(SkipReason::OutputExists(PathBuf::from("out/model.pdb"))),
        };
        assert_eq!(
            report.to_string(),
            "in/model.pdb: skipped: output already exists (out/model.pdb)"
        );
    }
}
