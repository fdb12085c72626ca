//! Provides input functionality for the PDB fixed-column record format.
//!
//! Only the record tag, chain identifier, residue number and insertion code
//! columns are interpreted. Every other byte of an atom line is treated as
//! opaque payload and carried through unchanged.

pub mod pdb;
