//! Block report output
//!
//! Writes the assembled block as a flat text artifact.

pub mod writer;

pub use writer::ReportWriter;
