//! Command-line interface
//!
//! Optional flags that override the configured paths.

pub mod commands;

pub use commands::Opt;
