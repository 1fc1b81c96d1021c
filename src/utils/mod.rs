//! Utility functions and helpers
//!
//! Hashing, the wall clock, and the byte-level encoding helpers
//! used by the transaction and header serializers.

pub mod crypto;
pub mod encoding;

pub use crypto::{current_timestamp, double_sha256, sha256_digest};

pub use encoding::{
    decode_hex, decode_txid, encode_varint, script_bytes, txid_bytes, write_var_bytes,
};
