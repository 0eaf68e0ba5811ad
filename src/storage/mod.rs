//! Storage layer for exported records.
//!
//! This module writes a scanned `ResultSet` out as delimited text.

pub mod csv;

// Re-export key types
pub use csv::{CsvExporter, ExportOutcome};
