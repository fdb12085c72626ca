//! # Engine Module
//!
//! The relabeling logic proper. Each submodule is one stage of the per-file
//! pipeline and is usable on its own:
//!
//! - [`sequencer`] folds the atom record stream into a flat residue arena.
//! - [`plan`] turns four declared segment lengths into two index ranges,
//!   cross-checked against the observed residue count.
//! - [`assignment`] maps every flat residue index to output chain `A`, `B`, or
//!   nothing.
//! - [`rewrite`] builds and serializes the two-chain structure.
//! - [`remap`] is the alternate path: direct chain-identifier substitution
//!   guarded by a required-chain check.
//!
//! [`outcome`] and [`error`] describe how a single file ended up, and
//! [`progress`] lets batch drivers report as files complete.

pub mod assignment;
pub mod error;
pub mod outcome;
pub mod plan;
pub mod progress;
pub mod remap;
pub mod rewrite;
pub mod sequencer;
