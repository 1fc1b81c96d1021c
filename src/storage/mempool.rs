// This file reads the mempool: a directory where every JSON file holds one transaction
// I read every record's bytes first and decode them afterwards

use crate::core::Transaction;
use crate::error::{AssemblyError, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Only directory entries with this suffix are treated as transaction records
pub const RECORD_SUFFIX: &str = ".json";

/// Raw bytes of one mempool record, tagged with the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBlob {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RecordBlob {
    pub fn new(name: &str, bytes: impl Into<Vec<u8>>) -> RecordBlob {
        RecordBlob {
            name: name.to_string(),
            bytes: bytes.into(),
        }
    }
}

fn directory_error(path: &Path, err: impl std::fmt::Display) -> AssemblyError {
    AssemblyError::DirectoryRead {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Read every `*.json` file in `dir`, in file-name order.
/// Directories and files with other suffixes are skipped.
pub fn read_record_blobs(dir: &Path) -> Result<Vec<RecordBlob>> {
    let entries = fs::read_dir(dir).map_err(|e| directory_error(dir, e))?;

    let mut records = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| directory_error(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type().map_err(|e| directory_error(&entry.path(), e))?;

        if file_type.is_dir() || !name.ends_with(RECORD_SUFFIX) {
            debug!("Skipping mempool entry {name}");
            continue;
        }
        records.push((name, entry.path()));
    }
    // I sort by file name so the block order never depends on the filesystem
    records.sort_by(|a, b| a.0.cmp(&b.0));

    let mut blobs = Vec::with_capacity(records.len());
    for (name, path) in records {
        let bytes = fs::read(&path).map_err(|e| directory_error(&path, e))?;
        blobs.push(RecordBlob { name, bytes });
    }
    Ok(blobs)
}

/// Decode each blob into a transaction, keeping the blob order.
/// The first malformed blob aborts the whole load.
pub fn load_transactions(blobs: &[RecordBlob]) -> Result<Vec<Transaction>> {
    blobs
        .iter()
        .map(|blob| {
            // I keep the file name in the error so the bad record is easy to find
            serde_json::from_slice::<Transaction>(&blob.bytes).map_err(|e| {
                AssemblyError::RecordDecode {
                    name: blob.name.clone(),
                    reason: e.to_string(),
                }
            })
        })
        .collect()
}

/// A mempool directory of one-transaction-per-file JSON records
pub struct MempoolDir {
    path: PathBuf,
}

impl MempoolDir {
    pub fn new(path: impl Into<PathBuf>) -> MempoolDir {
        MempoolDir { path: path.into() }
    }

    pub fn get_path(&self) -> &Path {
        self.path.as_path()
    }

    // This is the whole load: read every record, then decode them in order
    pub fn load(&self) -> Result<Vec<Transaction>> {
        let blobs = read_record_blobs(&self.path)?;
        let transactions = load_transactions(&blobs)?;
        info!("Number of transactions in mempool: {}", transactions.len());
        Ok(transactions)
    }
}
