//! # Core Module
//!
//! Record-level building blocks shared by both relabeling modes.
//!
//! - **Record models** ([`models`]) - atom records, residues and output chain labels
//! - **File I/O** ([`io`]) - fixed-column PDB reading and column accessors

pub mod io;
pub mod models;
