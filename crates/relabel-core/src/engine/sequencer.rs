use super::error::EngineError;
use crate::core::io::pdb::{self, PdbError, RawAtomLine};
use crate::core::models::record::AtomRecord;
use crate::core::models::residue::Residue;
use std::path::Path;
use tracing::debug;

/// Position of a residue in the flat, cross-chain, file-ordered sequence.
pub type ResidueIndex = usize;

/// Residues of one structure, addressed by flat index.
///
/// Order is first-appearance order in the source file. Residues from different
/// source chains are concatenated as they appear, which is what segment
/// lengths declared over the concatenated sequence are counted against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueArena {
    residues: Vec<Residue>,
}

impl ResidueArena {
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn get(&self, index: ResidueIndex) -> Option<&Residue> {
        self.residues.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResidueIndex, &Residue)> {
        self.residues.iter().enumerate()
    }

    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(Residue::len).sum()
    }

    /// Distinct source chain identifiers, in order of first appearance.
    pub fn source_chain_ids(&self) -> Vec<char> {
        let mut ids: Vec<char> = Vec::new();
        for residue in &self.residues {
            if !ids.contains(&residue.key.chain_id) {
                ids.push(residue.key.chain_id);
            }
        }
        ids
    }
}

#[derive(Debug, Default)]
struct FoldState {
    open: Option<Residue>,
    finished: Vec<Residue>,
}

impl FoldState {
    fn step(mut self, record: AtomRecord) -> Self {
        match self.open.as_mut() {
            Some(open) if open.key == record.key() => open.push(record),
            _ => {
                if let Some(done) = self.open.replace(Residue::new(record)) {
                    self.finished.push(done);
                }
            }
        }
        self
    }

    fn finish(mut self) -> ResidueArena {
        if let Some(last) = self.open.take() {
            self.finished.push(last);
        }
        ResidueArena {
            residues: self.finished,
        }
    }
}

/// Groups contiguous records sharing a residue key into residues.
///
/// A key change always closes the open residue; a key seen again later opens a
/// new one rather than merging back, since numbering restarts per chain.
pub fn sequence_residues<I>(records: I) -> ResidueArena
where
    I: IntoIterator<Item = AtomRecord>,
{
    records
        .into_iter()
        .fold(FoldState::default(), FoldState::step)
        .finish()
}

/// Like [`sequence_residues`], but over a fallible record stream, stopping at
/// the first error.
pub fn try_sequence_residues<I>(records: I) -> Result<ResidueArena, PdbError>
where
    I: IntoIterator<Item = Result<AtomRecord, PdbError>>,
{
    records
        .into_iter()
        .try_fold(
            FoldState::default(),
            |state, record| -> Result<FoldState, PdbError> { Ok(state.step(record?)) },
        )
        .map(FoldState::finish)
}

/// Reads, parses and sequences a PDB file in a single streaming pass.
pub fn sequence_file(path: &Path) -> Result<ResidueArena, EngineError> {
    let lines = pdb::open_atom_lines(path).map_err(|e| EngineError::input(path, e))?;
    let arena = try_sequence_residues(lines.map(|raw| raw.and_then(RawAtomLine::parse)))
        .map_err(|e| EngineError::input(path, e))?;

    debug!(
        "Sequenced {} residue(s) from {} atom record(s) across source chains {:?}",
        arena.len(),
        arena.atom_count(),
        arena.source_chain_ids()
    );
    Ok(arena)
}
