use crate::core::models::record::{AtomRecord, RecordKind};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

pub const SERIAL_COLUMNS: Range<usize> = 6..11; // Columns 7-11
pub const CHAIN_ID_COLUMN: usize = 21; // Column 22
pub const RESIDUE_NUMBER_COLUMNS: Range<usize> = 22..26; // Columns 23-26
pub const INSERTION_CODE_COLUMN: usize = 26; // Column 27

/// Shortest atom line that still carries a complete residue number field.
pub const MIN_ATOM_RECORD_LEN: usize = RESIDUE_NUMBER_COLUMNS.end;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed record on line {line}: {kind}")]
    MalformedRecord {
        line: usize,
        kind: MalformedRecordKind,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedRecordKind {
    #[error("line is {len} bytes long, ATOM/HETATM records need at least {min}")]
    LineTooShort { len: usize, min: usize },
    #[error("invalid residue number in columns 23-26 (value: '{value}')")]
    InvalidResidueNumber { value: String },
    #[error("chain identifier in column 22 is not a single ASCII character")]
    InvalidChainColumn,
}

/// Validated fixed-column view over one atom line.
///
/// Construction checks the line is long enough for every interpreted column,
/// so the accessors never index out of bounds.
#[derive(Debug, Clone, Copy)]
pub struct Columns<'a> {
    line: &'a str,
    line_number: usize,
}

impl<'a> Columns<'a> {
    pub fn new(line: &'a str, line_number: usize) -> Result<Self, PdbError> {
        if line.len() < MIN_ATOM_RECORD_LEN {
            return Err(PdbError::MalformedRecord {
                line: line_number,
                kind: MalformedRecordKind::LineTooShort {
                    len: line.len(),
                    min: MIN_ATOM_RECORD_LEN,
                },
            });
        }
        Ok(Self { line, line_number })
    }

    fn malformed(&self, kind: MalformedRecordKind) -> PdbError {
        PdbError::MalformedRecord {
            line: self.line_number,
            kind,
        }
    }

    pub fn serial(&self) -> Option<u32> {
        self.line.get(SERIAL_COLUMNS)?.trim().parse().ok()
    }

    pub fn chain_id(&self) -> Result<char, PdbError> {
        let byte = self.line.as_bytes()[CHAIN_ID_COLUMN];
        if byte.is_ascii() {
            Ok(byte as char)
        } else {
            Err(self.malformed(MalformedRecordKind::InvalidChainColumn))
        }
    }

    pub fn residue_number(&self) -> Result<i32, PdbError> {
        let raw = self.line.get(RESIDUE_NUMBER_COLUMNS).ok_or_else(|| {
            self.malformed(MalformedRecordKind::InvalidResidueNumber {
                value: String::from_utf8_lossy(&self.line.as_bytes()[RESIDUE_NUMBER_COLUMNS])
                    .into_owned(),
            })
        })?;
        raw.trim().parse().map_err(|_| {
            self.malformed(MalformedRecordKind::InvalidResidueNumber {
                value: raw.to_string(),
            })
        })
    }

    pub fn insertion_code(&self) -> Option<char> {
        match self.line.as_bytes().get(INSERTION_CODE_COLUMN) {
            Some(&b) if b.is_ascii() && !b.is_ascii_whitespace() => Some(b as char),
            _ => None,
        }
    }
}

/// An atom-bearing line as it came off the reader, not yet column-validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAtomLine {
    pub line_number: usize,
    pub kind: RecordKind,
    pub text: String,
}

impl RawAtomLine {
    pub fn parse(self) -> Result<AtomRecord, PdbError> {
        let columns = Columns::new(&self.text, self.line_number)?;
        let chain_id = columns.chain_id()?;
        let residue_number = columns.residue_number()?;
        let insertion_code = columns.insertion_code();
        let serial = columns.serial();

        Ok(AtomRecord::new(
            self.kind,
            serial,
            residue_number,
            insertion_code,
            chain_id,
            self.line_number,
            self.text,
        ))
    }
}

/// Lazy stream of the ATOM/HETATM lines of a PDB file.
///
/// Every other record is dropped here, before anything downstream sees it;
/// prediction and relaxation tools decorate their output with score tables and
/// remarks that must not affect parsing. Reopen the source to restart.
pub struct AtomLines<B> {
    lines: io::Lines<B>,
    line_number: usize,
}

impl<B: BufRead> Iterator for AtomLines<B> {
    type Item = Result<RawAtomLine, PdbError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            if let Some(kind) = RecordKind::classify(&text) {
                return Some(Ok(RawAtomLine {
                    line_number: self.line_number,
                    kind,
                    text,
                }));
            }
        }
    }
}

pub fn atom_lines<B: BufRead>(reader: B) -> AtomLines<B> {
    AtomLines {
        lines: reader.lines(),
        line_number: 0,
    }
}

pub fn open_atom_lines<P: AsRef<Path>>(path: P) -> Result<AtomLines<BufReader<File>>, PdbError> {
    let file = File::open(path)?;
    Ok(atom_lines(BufReader::new(file)))
}

/// Reads and parses every atom record from `reader`, in file order.
pub fn read_records<B: BufRead>(reader: B) -> Result<Vec<AtomRecord>, PdbError> {
    atom_lines(reader)
        .map(|raw| raw.and_then(RawAtomLine::parse))
        .collect()
}

pub fn read_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<AtomRecord>, PdbError> {
    let file = File::open(path)?;
    read_records(BufReader::new(file))
}
