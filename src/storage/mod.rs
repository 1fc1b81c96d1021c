//! Mempool storage
//!
//! Reads the directory of pending transaction records and decodes them.

pub mod mempool;

pub use mempool::{load_transactions, read_record_blobs, MempoolDir, RecordBlob, RECORD_SUFFIX};
