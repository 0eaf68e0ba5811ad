//! Core types for dynamo-export.
//!
//! `attribute` holds the store's typed wire format, `record` the flat rows it decodes into.

pub mod attribute;
pub mod record;

// Re-export key types for convenience
pub use attribute::{AttributeValue, RawItem, unmarshall};
pub use record::{Record, ResultSet, header_of, render_value};
