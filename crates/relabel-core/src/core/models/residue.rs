use super::record::AtomRecord;
use std::fmt;

/// Identity of a residue within its source chain: chain column, residue
/// number and insertion code. Two atom lines belong to the same residue only
/// if they share this key *and* are adjacent in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResidueKey {
    pub chain_id: char,
    pub residue_number: i32,
    pub insertion_code: Option<char>,
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain_id, self.residue_number)?;
        if let Some(code) = self.insertion_code {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub key: ResidueKey,
    pub(crate) atoms: Vec<AtomRecord>, // Contiguous records in file order
}

impl Residue {
    pub(crate) fn new(first: AtomRecord) -> Self {
        Self {
            key: first.key(),
            atoms: vec![first],
        }
    }

    pub(crate) fn push(&mut self, record: AtomRecord) {
        debug_assert_eq!(record.key(), self.key);
        self.atoms.push(record);
    }

    pub fn atoms(&self) -> &[AtomRecord] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Copies the residue with every constituent record moved to `chain_id`.
    pub fn relabeled(&self, chain_id: char) -> Self {
        Self {
            key: ResidueKey {
                chain_id,
                ..self.key
            },
            atoms: self
                .atoms
                .iter()
                .map(|atom| atom.with_chain_id(chain_id))
                .collect(),
        }
    }
}
