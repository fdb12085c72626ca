use super::plan::ChainRanges;
use super::sequencer::ResidueIndex;
use crate::core::models::chain::OutputChain;

/// Output chain of every flat residue index, fixed once computed.
///
/// Kept apart from the residues themselves so the arena never needs to know
/// which chain it ends up in. `None` marks a residue that falls outside both
/// ranges; such residues are not written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainAssignment {
    labels: Vec<Option<OutputChain>>,
}

impl ChainAssignment {
    pub fn from_ranges(ranges: &ChainRanges, total: usize) -> Self {
        Self {
            labels: (0..total).map(|index| ranges.chain_of(index)).collect(),
        }
    }

    pub fn get(&self, index: ResidueIndex) -> Option<OutputChain> {
        self.labels.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn count(&self, chain: OutputChain) -> usize {
        self.labels.iter().filter(|&&l| l == Some(chain)).count()
    }

    pub fn dropped(&self) -> usize {
        self.labels.iter().filter(|l| l.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::plan::SegmentPlan;

    #[test]
    fn assignment_follows_planned_ranges() {
        let ranges = SegmentPlan::new(3, 9, 15, 14).ranges(41).unwrap();
        let assignment = ChainAssignment::from_ranges(&ranges, 41);

        assert_eq!(assignment.len(), 41);
        assert_eq!(assignment.get(0), Some(OutputChain::A));
        assert_eq!(assignment.get(11), Some(OutputChain::A));
        assert_eq!(assignment.get(12), Some(OutputChain::B));
        assert_eq!(assignment.count(OutputChain::A), 12);
        assert_eq!(assignment.count(OutputChain::B), 29);
        assert_eq!(assignment.dropped(), 0);
    }

    #[test]
    fn residues_outside_both_ranges_are_dropped() {
        let ranges = ChainRanges { a: 0..2, b: 2..5 };
        let assignment = ChainAssignment::from_ranges(&ranges, 8);

        assert_eq!(assignment.get(5), None);
        assert_eq!(assignment.get(7), None);
        assert_eq!(assignment.dropped(), 3);
        assert_eq!(
            assignment.count(OutputChain::A) + assignment.count(OutputChain::B),
            5
        );
    }

    #[test]
    fn out_of_bounds_index_has_no_chain() {
        let assignment = ChainAssignment::from_ranges(&ChainRanges { a: 0..1, b: 1..2 }, 2);
        assert_eq!(assignment.get(99), None);
    }
}
