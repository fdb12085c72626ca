use super::error::EngineError;
use crate::core::io::pdb::CHAIN_ID_COLUMN;
use crate::core::models::record::RecordKind;
use phf::{Map, Set, phf_map, phf_set};
use std::collections::{BTreeMap, BTreeSet};

/// Chain layout of a five-chain prediction (MHC, B2M, peptide, TCRα, TCRβ as
/// `A`-`E`) collapsed to the two interface partners.
pub static DEFAULT_CHAIN_MAP: Map<char, char> = phf_map! {
    'A' => 'A',
    'B' => 'A',
    'C' => 'A',
    'D' => 'B',
    'E' => 'B',
};

pub static DEFAULT_REQUIRED_CHAINS: Set<char> = phf_set! {
    'A', 'B', 'C', 'D', 'E',
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapConfig {
    pub chain_map: BTreeMap<char, char>,
    pub required: BTreeSet<char>,
}

impl Default for RemapConfig {
    fn default() -> Self {
        Self {
            chain_map: DEFAULT_CHAIN_MAP.entries().map(|(&k, &v)| (k, v)).collect(),
            required: DEFAULT_REQUIRED_CHAINS.iter().copied().collect(),
        }
    }
}

impl RemapConfig {
    pub fn builder() -> RemapConfigBuilder {
        RemapConfigBuilder::new()
    }

    fn target(&self, chain_id: char) -> char {
        self.chain_map.get(&chain_id).copied().unwrap_or(chain_id)
    }
}

#[derive(Debug, Default)]
pub struct RemapConfigBuilder {
    chain_map: BTreeMap<char, char>,
    required: BTreeSet<char>,
}

impl RemapConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain_map(mut self, entries: impl IntoIterator<Item = (char, char)>) -> Self {
        self.chain_map.extend(entries);
        self
    }

    pub fn require(mut self, chains: impl IntoIterator<Item = char>) -> Self {
        self.required.extend(chains);
        self
    }

    pub fn build(self) -> Result<RemapConfig, EngineError> {
        if let Some(c) = self
            .chain_map
            .iter()
            .flat_map(|(&k, &v)| [k, v])
            .chain(self.required.iter().copied())
            .find(|c| !c.is_ascii() || c.is_ascii_control())
        {
            return Err(EngineError::InvalidRemap(format!(
                "chain identifier {:?} is not a printable ASCII character",
                c
            )));
        }
        Ok(RemapConfig {
            chain_map: self.chain_map,
            required: self.required,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemapDecision {
    Applied {
        text: String,
        observed: BTreeSet<char>,
        substituted: usize,
    },
    CriteriaNotMet {
        observed: BTreeSet<char>,
        missing: BTreeSet<char>,
    },
}

/// Chain column byte of an atom-bearing line, if it has one.
fn chain_byte(line: &str) -> Option<u8> {
    RecordKind::classify(line)?;
    let content = line.trim_end_matches(['\n', '\r']);
    content
        .as_bytes()
        .get(CHAIN_ID_COLUMN)
        .copied()
        .filter(u8::is_ascii)
}

/// Distinct chain identifiers found on ATOM/HETATM lines.
pub fn observed_chains(text: &str) -> BTreeSet<char> {
    text.split_inclusive('\n')
        .filter_map(chain_byte)
        .map(char::from)
        .collect()
}

/// Substitutes chain identifiers on every atom line, but only when every
/// required chain is present. Everything else, line terminators included, is
/// passed through byte for byte.
pub fn remap_text(text: &str, config: &RemapConfig) -> RemapDecision {
    let observed = observed_chains(text);
    let missing: BTreeSet<char> = config.required.difference(&observed).copied().collect();
    if !missing.is_empty() {
        return RemapDecision::CriteriaNotMet { observed, missing };
    }

    let mut out = String::with_capacity(text.len());
    let mut substituted = 0;
    for line in text.split_inclusive('\n') {
        match chain_byte(line) {
            Some(old) => {
                let new = config.target(char::from(old));
                if new != char::from(old) {
                    substituted += 1;
                }
                out.push_str(&line[..CHAIN_ID_COLUMN]);
                out.push(new);
                out.push_str(&line[CHAIN_ID_COLUMN + 1..]);
            }
            None => out.push_str(line),
        }
    }

    RemapDecision::Applied {
        text: out,
        observed,
        substituted,
    }
}
