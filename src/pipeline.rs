//! The single linear assembly run:
//! load → validate → coinbase + assemble → serialize + hash → report.

use crate::config::Settings;
use crate::core::{BlockAssembler, TransactionValidator, ValidationResult};
use crate::error::{AssemblyError, Result};
use crate::report::ReportWriter;
use crate::storage::MempoolDir;
use log::info;
use std::path::PathBuf;

/// What one run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub loaded: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub transaction_count: u64,
    pub block_size: u64,
    pub block_hash: String,
    pub output_path: PathBuf,
}

/// Stamp the block with the current time
pub fn run(settings: &Settings) -> Result<RunSummary> {
    run_with_timestamp(settings, None)
}

/// Run with a fixed header timestamp (or the wall clock when `None`)
pub fn run_with_timestamp(settings: &Settings, timestamp: Option<u32>) -> Result<RunSummary> {
    // I log every configured limit up front, enforced or not
    info!(
        "Limits: max block size {} bytes, max coin value {}, coinbase maturity {}, sigop limit {}, min tx size {}, min fee {}",
        settings.max_block_size,
        settings.max_coin_value,
        settings.coinbase_maturity,
        settings.signature_operation_limit,
        settings.min_transaction_size,
        settings.min_transaction_fee
    );

    // Loading is all-or-nothing: a missing directory or one bad record stops me here,
    // before anything is written
    let transactions = MempoolDir::new(&settings.mempool_path).load()?;
    let loaded = transactions.len();

    // Rejected transactions are logged by the validator and simply left out of the block
    let validator = TransactionValidator::new(settings);
    let batch = validator.partition(transactions);
    info!("Number of valid transactions: {}", batch.accepted.len());
    let accepted = batch.accepted.len();
    let rejected = batch.rejected.len();

    // The coinbase goes in first, then the accepted transactions in mempool order
    let assembler = BlockAssembler::new(settings);
    let block = match timestamp {
        Some(timestamp) => assembler.assemble_at(batch.accepted, timestamp)?,
        None => assembler.assemble(batch.accepted)?,
    };

    // I re-check the finished block before hashing it: coinbase first, fee rule for the rest
    if let ValidationResult::Invalid(reason) = validator.check_block(&block) {
        return Err(AssemblyError::InvalidBlock(reason));
    }

    let block_hash = block.get_header().hash_hex();
    info!("Block hash: {block_hash}");

    // The report replaces whatever output file was there before
    let writer = ReportWriter::new(&settings.output_path);
    writer.write(&block)?;

    Ok(RunSummary {
        loaded,
        accepted,
        rejected,
        transaction_count: block.get_transaction_count(),
        block_size: block.get_size(),
        block_hash,
        output_path: settings.output_path.clone(),
    })
}
