use crate::core::Transaction;
use crate::error::{AssemblyError, Result};
use crate::utils::double_sha256;
use data_encoding::HEXLOWER;

/// Fixed 32-byte hash
pub type Hash = [u8; 32];

/// Bytes reserved for the transaction-count field in size accounting
pub const TRANSACTION_COUNT_FIELD_LEN: u64 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub version: u32,
    pub previous_block_hash: Hash,
    pub merkle_root: Hash,
    pub timestamp: u32,
    /// Carried as raw text, never converted to compact bits
    pub difficulty_target: String,
    pub nonce: u32,
}

impl BlockHeader {
    /// Width of every field except the difficulty target
    pub const FIXED_LEN: usize = 4 + 32 + 32 + 4 + 4;

    /// A header that does not chain to a previous block and carries no merkle
    /// commitment: both hashes are zero and the nonce is a placeholder.
    pub fn new(version: u32, timestamp: u32, difficulty_target: &str) -> BlockHeader {
        BlockHeader {
            version,
            previous_block_hash: [0u8; 32],
            merkle_root: [0u8; 32],
            timestamp,
            difficulty_target: difficulty_target.to_string(),
            nonce: 0,
        }
    }

    /// Fields in declaration order, integers little-endian, no padding and no
    /// length prefix on the target text.
    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.serialized_len());
        data.extend_from_slice(&self.version.to_le_bytes());
        data.extend_from_slice(&self.previous_block_hash);
        data.extend_from_slice(&self.merkle_root);
        data.extend_from_slice(&self.timestamp.to_le_bytes());
        data.extend_from_slice(self.difficulty_target.as_bytes());
        data.extend_from_slice(&self.nonce.to_le_bytes());
        data
    }

    pub fn serialized_len(&self) -> usize {
        Self::FIXED_LEN + self.difficulty_target.len()
    }

    /// Double SHA-256 of the serialized header
    pub fn hash(&self) -> Hash {
        double_sha256(&self.serialize())
    }

    pub fn hash_hex(&self) -> String {
        HEXLOWER.encode(&self.hash())
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    size: u64,
    header: BlockHeader,
    transaction_count: u64,
    transactions: Vec<Transaction>,
}

impl Block {
    /// Build a block around an ordered transaction list whose first entry is the coinbase
    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Result<Block> {
        match transactions.first() {
            None => {
                return Err(AssemblyError::InvalidBlock(
                    "Block must contain at least the coinbase transaction".to_string(),
                ))
            }
            Some(first) if !first.is_coinbase() => {
                return Err(AssemblyError::InvalidBlock(
                    "First transaction must be coinbase".to_string(),
                ))
            }
            Some(_) => {}
        }

        let size = Self::calculate_size(&header, &transactions);
        Ok(Block {
            size,
            header,
            transaction_count: transactions.len() as u64,
            transactions,
        })
    }

    /// Header bytes, plus the count field, plus each transaction's wire length
    pub fn calculate_size(header: &BlockHeader, transactions: &[Transaction]) -> u64 {
        let header_size = header.serialized_len() as u64 + TRANSACTION_COUNT_FIELD_LEN;
        header_size
            + transactions
                .iter()
                .map(Transaction::serialized_size)
                .sum::<u64>()
    }

    pub fn get_size(&self) -> u64 {
        self.size
    }

    pub fn get_header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn get_transaction_count(&self) -> u64 {
        self.transaction_count
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn get_coinbase(&self) -> &Transaction {
        &self.transactions[0]
    }

    pub fn get_hash(&self) -> Hash {
        self.header.hash()
    }
}
