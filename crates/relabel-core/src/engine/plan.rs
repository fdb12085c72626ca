use super::error::EngineError;
use crate::core::models::chain::OutputChain;
use std::fmt;
use std::ops::Range;

pub const SEGMENT_COUNT: usize = 4;

/// Separator between segments in a concatenated chain-sequence string
/// (`MHC/PEPTIDE/TCRA/TCRB`).
pub const CHAINSEQ_SEPARATOR: char = '/';

/// Residue counts of the four biological segments, in concatenation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentPlan {
    pub mhc: usize,
    pub peptide: usize,
    pub tcr_alpha: usize,
    pub tcr_beta: usize,
}

impl SegmentPlan {
    pub fn new(mhc: usize, peptide: usize, tcr_alpha: usize, tcr_beta: usize) -> Self {
        Self {
            mhc,
            peptide,
            tcr_alpha,
            tcr_beta,
        }
    }

    pub fn from_lengths(lengths: &[usize]) -> Result<Self, EngineError> {
        match *lengths {
            [mhc, peptide, tcr_alpha, tcr_beta] => {
                Ok(Self::new(mhc, peptide, tcr_alpha, tcr_beta))
            }
            _ => Err(EngineError::InvalidPlan(format!(
                "expected {} segment lengths, got {}",
                SEGMENT_COUNT,
                lengths.len()
            ))),
        }
    }

    /// Derives the plan from a `/`-separated chain sequence, one segment per
    /// biological chain. Segment lengths are character counts.
    pub fn from_chainseq(chainseq: &str) -> Result<Self, EngineError> {
        let lengths: Vec<usize> = chainseq
            .split(CHAINSEQ_SEPARATOR)
            .map(|segment| segment.chars().count())
            .collect();
        Self::from_lengths(&lengths).map_err(|_| {
            EngineError::InvalidPlan(format!(
                "expected {} chain segments separated by '{}', got {}",
                SEGMENT_COUNT,
                CHAINSEQ_SEPARATOR,
                lengths.len()
            ))
        })
    }

    /// Sum of the four lengths, or `None` if it does not fit in a `usize`.
    pub fn total(&self) -> Option<usize> {
        self.mhc
            .checked_add(self.peptide)?
            .checked_add(self.tcr_alpha)?
            .checked_add(self.tcr_beta)
    }

    /// Computes the half-open flat-index ranges of the two output chains.
    ///
    /// The declared total must equal the number of residues actually parsed;
    /// any difference means the plan and the structure disagree and the file
    /// cannot be split safely.
    pub fn ranges(&self, observed: usize) -> Result<ChainRanges, EngineError> {
        let declared = self.total().ok_or_else(|| {
            EngineError::InvalidPlan(format!("segment lengths ({}) overflow when summed", self))
        })?;
        if declared != observed {
            return Err(EngineError::SegmentMismatch { declared, observed });
        }

        let split = self.mhc + self.peptide;
        Ok(ChainRanges {
            a: 0..split,
            b: split..declared,
        })
    }
}

impl fmt::Display for SegmentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MHC {} + peptide {} | TCRα {} + TCRβ {}",
            self.mhc, self.peptide, self.tcr_alpha, self.tcr_beta
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRanges {
    pub a: Range<usize>,
    pub b: Range<usize>,
}

impl ChainRanges {
    /// Output chain for a flat residue index; `None` if it lies in neither range.
    pub fn chain_of(&self, index: usize) -> Option<OutputChain> {
        if self.a.contains(&index) {
            Some(OutputChain::A)
        } else if self.b.contains(&index) {
            Some(OutputChain::B)
        } else {
            None
        }
    }
}
