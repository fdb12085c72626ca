use super::write_atomically;
use crate::engine::error::EngineError;
use crate::engine::outcome::{FileStage, Outcome, RemapSummary, RewriteSummary, SkipReason};
use crate::engine::remap::{RemapConfig, RemapDecision, remap_text};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Rewrites chain identifiers of one file through `config.chain_map`, but only
/// if every chain in `config.required` occurs in it.
///
/// When the requirement is not met the input is copied through unchanged and
/// the outcome is a skip, not a failure. An existing `output` is never touched.
#[instrument(skip_all, name = "remap_workflow", fields(input = %input.display()))]
pub fn run(input: &Path, output: &Path, config: &RemapConfig) -> Outcome {
    if output.exists() {
        info!("Output already exists, skipping: {}", output.display());
        return Outcome::Skipped(SkipReason::OutputExists(output.to_path_buf()));
    }

    let text = match fs::read_to_string(input) {
        Ok(text) => text,
        Err(e) => {
            let error = EngineError::input(input, e);
            warn!("{}", error);
            return Outcome::Failed {
                stage: FileStage::Unprocessed,
                error,
            };
        }
    };

    let (contents, outcome) = match remap_text(&text, config) {
        RemapDecision::Applied {
            text: remapped,
            observed,
            substituted,
        } => {
            info!(
                "[REMAP] {} (chains = {:?})",
                input.display(),
                observed
            );
            (
                remapped,
                Outcome::Rewritten(RewriteSummary::Remapped(RemapSummary {
                    observed,
                    lines_substituted: substituted,
                })),
            )
        }
        RemapDecision::CriteriaNotMet { observed, missing } => {
            info!(
                "[COPY ] {} (chains = {:?}, missing {:?})",
                input.display(),
                observed,
                missing
            );
            (
                text,
                Outcome::Skipped(SkipReason::CriteriaNotMet { observed, missing }),
            )
        }
    };

    match write_atomically(output, |writer| writer.write_all(contents.as_bytes())) {
        Ok(()) => outcome,
        Err(error) => {
            warn!("{}", error);
            Outcome::Failed {
                stage: FileStage::SetChecked,
                error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdb::CHAIN_ID_COLUMN;
    use std::path::PathBuf;

    fn write_input(dir: &Path, chains: &[char]) -> PathBuf {
        let mut text = String::from("HEADER    IMMUNE SYSTEM\r\nREMARK 1 model\r\n");
        for (i, &chain) in chains.iter().enumerate() {
            text.push_str(&format!(
                "ATOM  {:>5}  CA  GLY {}{:>4}      10.000  20.000  30.000  1.00 25.00           C\r\n",
                i + 1,
                chain,
                i + 1
            ));
        }
        text.push_str("END\r\n");
        let path = dir.join("complex.pdb");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn incomplete_chain_set_copies_file_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), &['A', 'B', 'C', 'D']);
        let output = dir.path().join("out/complex.pdb");

        let outcome = run(&input, &output, &RemapConfig::default());

        assert!(matches!(
            outcome,
            Outcome::Skipped(SkipReason::CriteriaNotMet { .. })
        ));
        assert!(!outcome.is_failure());
        assert_eq!(fs::read(&output).unwrap(), fs::read(&input).unwrap());
    }

    #[test]
    fn complete_chain_set_is_remapped() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), &['A', 'B', 'C', 'D', 'E']);
        let output = dir.path().join("complex.relabeled.pdb");

        let outcome = run(&input, &output, &RemapConfig::default());
        assert_eq!(outcome.label(), "rewritten");

        let before = fs::read(&input).unwrap();
        let after = fs::read(&output).unwrap();
        assert_eq!(before.len(), after.len());

        let chains: Vec<u8> = String::from_utf8(after.clone())
            .unwrap()
            .lines()
            .filter(|l| l.starts_with("ATOM"))
            .map(|l| l.as_bytes()[CHAIN_ID_COLUMN])
            .collect();
        assert_eq!(chains, b"AAABB".to_vec());

        let differing = before.iter().zip(&after).filter(|(a, b)| a != b).count();
        assert_eq!(differing, 4);
    }

    #[test]
    fn existing_output_is_skipped_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path(), &['A', 'B', 'C', 'D', 'E']);
        let output = dir.path().join("existing.pdb");
        fs::write(&output, "sentinel").unwrap();

        let outcome = run(&input, &output, &RemapConfig::default());
        assert!(matches!(
            outcome,
            Outcome::Skipped(SkipReason::OutputExists(_))
        ));
        assert_eq!(fs::read_to_string(&output).unwrap(), "sentinel");
    }

    #[test]
    fn unreadable_input_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = run(
            &dir.path().join("absent.pdb"),
            &dir.path().join("out.pdb"),
            &RemapConfig::default(),
        );
        assert!(outcome.is_failure());
        assert!(!dir.path().join("out.pdb").exists());
    }
}
