pub mod chain;
pub mod record;
pub mod residue;
