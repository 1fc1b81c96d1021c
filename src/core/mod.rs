//! Core block assembly functionality
//!
//! This module contains the transaction model, the fee-positivity validator,
//! block and header types, and the assembler that ties them together.

pub mod assembler;
pub mod block;
pub mod transaction;
pub mod validation;

pub use assembler::BlockAssembler;
pub use block::{Block, BlockHeader, Hash, TRANSACTION_COUNT_FIELD_LEN};
pub use transaction::{
    Prevout, Transaction, TxInput, TxOutput, COINBASE_PREVIOUS_INDEX, SEQUENCE_FINAL,
};
pub use validation::{RejectedTransaction, TransactionValidator, ValidatedBatch, ValidationResult};
