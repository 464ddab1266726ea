//! Durable storage for the memo tables
//!
//! A checkpoint holds both tables in a versioned little-endian format (see
//! [`codec`]). Saving writes a sibling `.tmp` file, syncs it and renames it
//! over the target, so an interrupted save leaves the previous checkpoint in
//! place.

pub mod codec;

use crate::solver::Tables;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("not a checkpoint file")]
    BadMagic,
    #[error("unsupported checkpoint version {0}")]
    UnsupportedVersion(u32),
    #[error("checkpoint is truncated")]
    Truncated,
    #[error("checkpoint is corrupt: {0}")]
    Corrupt(String),
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically replace the checkpoint at `path` with `tables`
///
/// # Errors
/// Returns `CheckpointError::Io` if the file cannot be written or renamed.
pub fn save(path: &Path, tables: &Tables) -> Result<(), CheckpointError> {
    let tmp = temp_path(path);
    let mut out = BufWriter::new(File::create(&tmp)?);
    codec::write_tables(&mut out, tables)?;
    out.flush()?;
    out.into_inner().map_err(io::IntoInnerError::into_error)?.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Load the checkpoint at `path`
///
/// # Errors
/// Returns `CheckpointError` if the file cannot be read or is not a valid
/// checkpoint.
pub fn load(path: &Path) -> Result<Tables, CheckpointError> {
    let mut input = BufReader::new(File::open(path)?);
    codec::read_tables(&mut input)
}
