use crate::core::Block;
use crate::error::{AssemblyError, Result};
use data_encoding::HEXLOWER;
use log::info;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the block report:
///
/// 1. the hex header digest
/// 2. the coinbase transaction as compact JSON
/// 3. one line per other transaction: the txid its first input spends
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> ReportWriter {
        ReportWriter { path: path.into() }
    }

    pub fn get_path(&self) -> &Path {
        self.path.as_path()
    }

    /// Build the full report text in memory
    pub fn render(block: &Block) -> Result<String> {
        let coinbase = block.get_coinbase();
        if !coinbase.is_coinbase() {
            return Err(AssemblyError::InvalidBlock(
                "First transaction must be coinbase".to_string(),
            ));
        }

        let mut report = String::new();
        report.push_str(&HEXLOWER.encode(&block.get_hash()));
        report.push('\n');
        report.push_str(&serde_json::to_string(coinbase)?);
        report.push('\n');

        for (index, tx) in block.get_transactions().iter().enumerate().skip(1) {
            let txid = tx.first_input_txid().ok_or_else(|| {
                AssemblyError::InvalidBlock(format!("Transaction {index} has no inputs"))
            })?;
            // Writing into a String cannot fail
            let _ = writeln!(report, "{txid}");
        }

        Ok(report)
    }

    /// Render, then replace the file in one write. Nothing is written if rendering fails.
    pub fn write(&self, block: &Block) -> Result<()> {
        let report = Self::render(block)?;
        fs::write(&self.path, report).map_err(|e| AssemblyError::OutputWrite {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        info!("Block data written to {}", self.path.display());
        Ok(())
    }
}
