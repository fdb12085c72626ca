//! # relabel Core Library
//!
//! Chain bookkeeping for TCR:pMHC structure files in the PDB fixed-column format.
//! Predicted complexes come out of structure prediction with one chain per
//! biological segment (MHC, peptide, TCRα, TCRβ), or with a single merged chain,
//! while interface analysis tools expect exactly two partners. This library
//! rewrites such files so that the MHC and peptide residues form chain `A` and
//! the two TCR chains form chain `B`.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless record models and the fixed-column
//!   PDB reader. Nothing here knows about segmentation plans.
//!
//! - **[`engine`]: The Logic Core.** Residue sequencing, the segmentation
//!   planner, chain assignment and rewriting, and the direct identifier-remap
//!   pass, together with the error taxonomy and the per-file `Outcome` type.
//!
//! - **[`workflows`]: The Public API.** Per-file entry points that apply the
//!   skip-if-exists policy and write outputs atomically, plus a parallel batch
//!   driver that never lets one bad file abort the run.

pub mod core;
pub mod engine;
pub mod workflows;
