//! # Workflows Module
//!
//! Per-file entry points and the batch driver built on them.
//!
//! - **Segment workflow** ([`segment`]) - re-segments residues into chains `A`
//!   and `B` according to a [`SegmentPlan`](crate::engine::plan::SegmentPlan).
//! - **Remap workflow** ([`remap`]) - substitutes chain identifiers directly
//!   when every required source chain is present.
//! - **Batch driver** ([`batch`]) - runs either workflow over many files in
//!   parallel and collects one [`FileReport`](crate::engine::outcome::FileReport)
//!   per file.
//!
//! Both workflows skip a file whose output already exists, and write outputs
//! through a sibling `.partial` file that is renamed into place, so an
//! interrupted run never leaves a truncated file behind to be skipped later.

pub mod batch;
pub mod remap;
pub mod segment;

use crate::engine::error::EngineError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub(crate) fn write_atomically<F>(path: &Path, write: F) -> Result<(), EngineError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    write_then_rename(path, write).map_err(|source| EngineError::Output {
        path: path.to_path_buf(),
        source,
    })
}

fn write_then_rename<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let partial = partial_path(path);
    let result = File::create(&partial)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write(&mut writer)?;
            writer.flush()
        })
        .and_then(|()| fs::rename(&partial, path));

    if result.is_err() {
        let _ = fs::remove_file(&partial);
    }
    result
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".partial");
    path.with_file_name(name)
}
