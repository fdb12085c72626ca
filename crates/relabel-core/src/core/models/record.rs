use super::residue::ResidueKey;
use crate::core::io::pdb::CHAIN_ID_COLUMN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Atom,
    Hetatm,
}

impl RecordKind {
    /// Classifies a raw line by its record tag, returning `None` for anything
    /// that is not an atom-bearing record (REMARK, TER, END, score tables, ...).
    pub fn classify(line: &str) -> Option<Self> {
        if line.starts_with("ATOM") {
            Some(Self::Atom)
        } else if line.starts_with("HETATM") {
            Some(Self::Hetatm)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomRecord {
    pub kind: RecordKind,
    pub serial: Option<u32>, // Blank or hybrid-36 serials are kept verbatim in `line`
    pub residue_number: i32,
    pub insertion_code: Option<char>,
    pub chain_id: char,
    pub line_number: usize, // 1-based position in the source file
    line: String,           // Verbatim source line, without terminator
}

impl AtomRecord {
    pub(crate) fn new(
        kind: RecordKind,
        serial: Option<u32>,
        residue_number: i32,
        insertion_code: Option<char>,
        chain_id: char,
        line_number: usize,
        line: String,
    ) -> Self {
        Self {
            kind,
            serial,
            residue_number,
            insertion_code,
            chain_id,
            line_number,
            line,
        }
    }

    pub fn key(&self) -> ResidueKey {
        ResidueKey {
            chain_id: self.chain_id,
            residue_number: self.residue_number,
            insertion_code: self.insertion_code,
        }
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    /// Returns a copy of this record whose chain column holds `chain_id`.
    ///
    /// All other bytes of the line are untouched. Parsing guarantees the chain
    /// column is a single ASCII byte, so the splice never lands inside a
    /// multi-byte character.
    pub fn with_chain_id(&self, chain_id: char) -> Self {
        debug_assert!(chain_id.is_ascii());
        let mut line = String::with_capacity(self.line.len());
        line.push_str(&self.line[..CHAIN_ID_COLUMN]);
        line.push(chain_id);
        line.push_str(&self.line[CHAIN_ID_COLUMN + 1..]);

        Self {
            chain_id,
            line,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str =
        "ATOM      1  N   GLY C   1      10.000  20.000  30.000  1.00 25.00           N";

    fn record() -> AtomRecord {
        AtomRecord::new(RecordKind::Atom, Some(1), 1, None, 'C', 7, LINE.to_string())
    }

    #[test]
    fn classify_recognizes_atom_bearing_records() {
        assert_eq!(RecordKind::classify(LINE), Some(RecordKind::Atom));
        assert_eq!(
            RecordKind::classify("HETATM  100 ZN    ZN A 301"),
            Some(RecordKind::Hetatm)
        );
        assert_eq!(RecordKind::classify("REMARK 220 SCORE"), None);
        assert_eq!(RecordKind::classify("TER"), None);
        assert_eq!(RecordKind::classify(""), None);
    }

    #[test]
    fn with_chain_id_changes_only_the_chain_column() {
        let relabeled = record().with_chain_id('A');
        assert_eq!(relabeled.chain_id, 'A');
        assert_eq!(relabeled.line().len(), LINE.len());
        for (i, (a, b)) in LINE.bytes().zip(relabeled.line().bytes()).enumerate() {
            if i == CHAIN_ID_COLUMN {
                assert_eq!(b, b'A');
            } else {
                assert_eq!(a, b, "byte {} changed", i);
            }
        }
    }

    #[test]
    fn with_chain_id_keeps_parsed_fields() {
        let relabeled = record().with_chain_id('B');
        assert_eq!(relabeled.serial, Some(1));
        assert_eq!(relabeled.residue_number, 1);
        assert_eq!(relabeled.line_number, 7);
        assert_eq!(relabeled.kind, RecordKind::Atom);
    }

    #[test]
    fn key_combines_chain_number_and_insertion_code() {
        let key = record().key();
        assert_eq!(key.chain_id, 'C');
        assert_eq!(key.residue_number, 1);
        assert_eq!(key.insertion_code, None);
    }
}
