use super::assignment::ChainAssignment;
use super::sequencer::ResidueArena;
use crate::core::models::chain::OutputChain;
use crate::core::models::residue::Residue;
use std::io::{self, Write};

pub const TER_RECORD: &str = "TER";
pub const END_RECORD: &str = "END";

/// The relabeled complex: chain `A` then chain `B`, each in flat order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputStructure {
    chain_a: Vec<Residue>,
    chain_b: Vec<Residue>,
}

impl OutputStructure {
    /// Copies every assigned residue into its output chain, rewriting the chain
    /// column of each of its records. Unassigned residues are left out.
    pub fn build(arena: &ResidueArena, assignment: &ChainAssignment) -> Self {
        let mut structure = Self::default();
        for (index, residue) in arena.iter() {
            let Some(chain) = assignment.get(index) else {
                continue;
            };
            let relabeled = residue.relabeled(chain.id());
            match chain {
                OutputChain::A => structure.chain_a.push(relabeled),
                OutputChain::B => structure.chain_b.push(relabeled),
            }
        }
        structure
    }

    pub fn residues(&self, chain: OutputChain) -> &[Residue] {
        match chain {
            OutputChain::A => &self.chain_a,
            OutputChain::B => &self.chain_b,
        }
    }

    pub fn residue_count(&self) -> usize {
        self.chain_a.len() + self.chain_b.len()
    }

    pub fn atom_count(&self) -> usize {
        self.chain_a
            .iter()
            .chain(&self.chain_b)
            .map(Residue::len)
            .sum()
    }

    /// Serializes the structure: atom lines of chain `A`, `TER`, atom lines of
    /// chain `B`, `TER`, `END`. A chain with no residues gets no `TER`.
    pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        for chain in [&self.chain_a, &self.chain_b] {
            if chain.is_empty() {
                continue;
            }
            for atom in chain.iter().flat_map(Residue::atoms) {
                writeln!(writer, "{}", atom.line())?;
            }
            writeln!(writer, "{}", TER_RECORD)?;
        }
        writeln!(writer, "{}", END_RECORD)?;
        Ok(())
    }
}
