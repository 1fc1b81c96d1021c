//! Fee-positivity validation
//!
//! A transaction is accepted iff the prevout values of its inputs add up to strictly
//! more than its outputs. Prevout values are trusted as supplied by the record.

use crate::config::Settings;
use crate::core::{Block, Transaction};
use log::info;

/// Outcome of checking one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTransaction {
    pub transaction: Transaction,
    pub reason: String,
}

/// A batch split by the validator. Both halves keep the input order.
#[derive(Debug, Clone, Default)]
pub struct ValidatedBatch {
    pub accepted: Vec<Transaction>,
    pub rejected: Vec<RejectedTransaction>,
}

pub struct TransactionValidator {
    min_transaction_fee: u64,
    enforce_min_fee: bool,
}

impl TransactionValidator {
    pub fn new(settings: &Settings) -> TransactionValidator {
        TransactionValidator {
            min_transaction_fee: settings.min_transaction_fee,
            enforce_min_fee: settings.policy.enforce_min_fee,
        }
    }

    /// True iff the transaction pays a strictly positive fee (and, with the
    /// minimum-fee policy on, at least `min_transaction_fee`).
    pub fn validate(&self, tx: &Transaction) -> bool {
        self.check(tx).is_valid()
    }

    pub fn check(&self, tx: &Transaction) -> ValidationResult {
        let input_total = match tx.input_value() {
            Ok(total) => total,
            Err(e) => return ValidationResult::Invalid(e.to_string()),
        };
        let output_total = match tx.output_value() {
            Ok(total) => total,
            Err(e) => return ValidationResult::Invalid(e.to_string()),
        };

        // A zero fee is rejected too
        if input_total <= output_total {
            return ValidationResult::Invalid(format!(
                "no positive fee: inputs={input_total}, outputs={output_total}"
            ));
        }

        let fee = input_total - output_total;
        if self.enforce_min_fee && fee < self.min_transaction_fee {
            return ValidationResult::Invalid(format!(
                "fee {fee} below minimum {}",
                self.min_transaction_fee
            ));
        }

        ValidationResult::Valid
    }

    /// Split a mempool batch. Coinbase-shaped records are rejected here so the
    /// block's own coinbase stays the only one.
    pub fn partition(&self, transactions: Vec<Transaction>) -> ValidatedBatch {
        let mut batch = ValidatedBatch::default();
        for tx in transactions {
            let result = if tx.is_coinbase() {
                ValidationResult::Invalid(
                    "coinbase records are not accepted from the mempool".to_string(),
                )
            } else {
                self.check(&tx)
            };
            match result {
                ValidationResult::Valid => batch.accepted.push(tx),
                ValidationResult::Invalid(reason) => {
                    info!(
                        "Invalid transaction {}: {reason}",
                        tx.first_input_txid().unwrap_or("<no inputs>")
                    );
                    batch.rejected.push(RejectedTransaction {
                        transaction: tx,
                        reason,
                    });
                }
            }
        }
        batch
    }

    /// Check an assembled block: one coinbase at index 0, every other
    /// transaction passing the fee rule. The coinbase itself is never fee-checked.
    pub fn check_block(&self, block: &Block) -> ValidationResult {
        let transactions = block.get_transactions();

        match transactions.first() {
            Some(first) if first.is_coinbase() => {}
            _ => {
                return ValidationResult::Invalid("first transaction must be coinbase".to_string())
            }
        }

        if block.get_transaction_count() != transactions.len() as u64 {
            return ValidationResult::Invalid(format!(
                "transaction count {} does not match {} transactions",
                block.get_transaction_count(),
                transactions.len()
            ));
        }

        for (index, tx) in transactions.iter().enumerate().skip(1) {
            if tx.is_coinbase() {
                return ValidationResult::Invalid(format!("extra coinbase at index {index}"));
            }
            if let ValidationResult::Invalid(reason) = self.check(tx) {
                return ValidationResult::Invalid(format!("transaction {index}: {reason}"));
            }
        }

        ValidationResult::Valid
    }
}
