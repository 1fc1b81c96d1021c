// This file builds the block: I take the accepted transactions, put my coinbase in front,
// and stamp a header on top. There is no mining here - the header is hashed once as-is

use crate::config::Settings;
use crate::core::{Block, BlockHeader, Transaction};
use crate::error::Result;
use crate::utils::current_timestamp;
use log::{info, warn};

/// Puts the coinbase in front of the accepted transactions and fills in the header.
///
/// No proof-of-work search happens here: the nonce stays 0, and the previous
/// block hash and merkle root stay zero-filled.
pub struct BlockAssembler {
    block_version: u32,
    difficulty_target: String,
    coinbase_reward: u64,
    max_block_size: u64,
    enforce_block_size: bool,
}

impl BlockAssembler {
    pub fn new(settings: &Settings) -> BlockAssembler {
        BlockAssembler {
            block_version: settings.block_version,
            difficulty_target: settings.difficulty_target.clone(),
            coinbase_reward: settings.coinbase_reward,
            max_block_size: settings.max_block_size,
            enforce_block_size: settings.policy.enforce_block_size,
        }
    }

    /// Assemble a block stamped with the current wall-clock time
    pub fn assemble(&self, accepted: Vec<Transaction>) -> Result<Block> {
        self.assemble_at(accepted, current_timestamp()?)
    }

    pub fn assemble_at(&self, accepted: Vec<Transaction>, timestamp: u32) -> Result<Block> {
        let header = BlockHeader::new(self.block_version, timestamp, &self.difficulty_target);
        // The coinbase always takes slot 0, whatever the accepted list looks like
        let coinbase = Transaction::new_coinbase_tx(self.coinbase_reward);

        let mut transactions = Vec::with_capacity(accepted.len() + 1);
        transactions.push(coinbase);

        // With the size policy on, I stop at the first transaction that would push the
        // block over the limit and leave out everything after it to keep mempool order
        if self.enforce_block_size {
            let mut size = Block::calculate_size(&header, &transactions);
            let offered = accepted.len();
            for tx in accepted {
                let tx_size = tx.serialized_size();
                if size + tx_size > self.max_block_size {
                    warn!(
                        "Block size limit {} reached, leaving out {} transaction(s)",
                        self.max_block_size,
                        offered + 1 - transactions.len()
                    );
                    break;
                }
                size += tx_size;
                transactions.push(tx);
            }
        } else {
            // By default every accepted transaction goes in
            transactions.extend(accepted);
        }

        let block = Block::new(header, transactions)?;
        info!(
            "Assembled block with {} transactions ({} bytes)",
            block.get_transaction_count(),
            block.get_size()
        );
        Ok(block)
    }
}
