//! Error handling for block assembly
//!
//! Every failure in a run surfaces as one of these variants and terminates the run.
//! Rejected transactions are not errors; they are reported by the validator.

use std::fmt;

/// Result type alias for block assembly operations
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Error types for the assembly pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// The mempool directory (or one of its files) could not be read
    DirectoryRead { path: String, reason: String },
    /// A mempool record could not be decoded into a transaction
    RecordDecode { name: String, reason: String },
    /// The output artifact could not be created or written
    OutputWrite { path: String, reason: String },
    /// Transaction value errors (sums that overflow)
    Transaction(String),
    /// Configuration file errors
    Config(String),
    /// Wire encoding errors (bad hex, wrong txid length, JSON rendering)
    Serialization(String),
    /// The assembled block breaks a structural invariant
    InvalidBlock(String),
    /// The system clock could not be read as seconds since epoch
    Clock(String),
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblyError::DirectoryRead { path, reason } => {
                write!(f, "Cannot read mempool at {path}: {reason}")
            }
            AssemblyError::RecordDecode { name, reason } => {
                write!(f, "Malformed transaction record {name}: {reason}")
            }
            AssemblyError::OutputWrite { path, reason } => {
                write!(f, "Cannot write output file {path}: {reason}")
            }
            AssemblyError::Transaction(msg) => write!(f, "Transaction error: {msg}"),
            AssemblyError::Config(msg) => write!(f, "Configuration error: {msg}"),
            AssemblyError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            AssemblyError::InvalidBlock(msg) => write!(f, "Invalid block: {msg}"),
            AssemblyError::Clock(msg) => write!(f, "Clock error: {msg}"),
        }
    }
}

impl std::error::Error for AssemblyError {}

impl From<serde_json::Error> for AssemblyError {
    fn from(err: serde_json::Error) -> Self {
        AssemblyError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AssemblyError {
    fn from(err: toml::de::Error) -> Self {
        AssemblyError::Config(err.to_string())
    }
}

impl From<data_encoding::DecodeError> for AssemblyError {
    fn from(err: data_encoding::DecodeError) -> Self {
        AssemblyError::Serialization(format!("Invalid hex: {err}"))
    }
}
