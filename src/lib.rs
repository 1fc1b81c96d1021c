//! # Block Assembler
//!
//! Builds one block from a directory of pending transactions and writes a report.
//!
//! ## Pipeline
//! 1. `storage/`: read every `*.json` record in the mempool directory and decode it
//! 2. `core/validation`: keep transactions whose inputs exceed their outputs
//! 3. `core/assembler`: put a coinbase first, fill in the header, account the size
//! 4. `core/block`: serialize the header and double-SHA-256 it
//! 5. `report/`: write the digest, the coinbase JSON and one spent txid per transaction
//!
//! `pipeline::run` drives the whole thing with an explicit `Settings` value.
//! There is no proof-of-work, no merkle tree and no chain: the header's previous
//! hash and merkle root are zero and the nonce is 0.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod storage;
pub mod utils;

pub use cli::Opt;
pub use config::{PolicySettings, Settings};
pub use crate::core::{
    Block, BlockAssembler, BlockHeader, Hash, Prevout, Transaction, TransactionValidator,
    TxInput, TxOutput, ValidatedBatch, ValidationResult,
};
pub use error::{AssemblyError, Result};
pub use pipeline::{run, RunSummary};
pub use report::ReportWriter;
pub use storage::{load_transactions, read_record_blobs, MempoolDir, RecordBlob};
pub use utils::{current_timestamp, double_sha256, sha256_digest};
