pub mod cli;
pub mod core;
pub mod export_cmd;
pub mod fetch;
pub mod storage;
pub mod store;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Invalid or missing parameters, raised before any I/O.
    #[error("{0}")]
    Config(String),
    /// A scan request against the table store failed.
    #[error("scan of table '{table}' failed: {message}")]
    Scan { table: String, message: String },
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

pub use cli::{Cli, ExportParams};
pub use crate::core::{AttributeValue, RawItem, Record, ResultSet};
pub use fetch::fetch_all;
pub use storage::{CsvExporter, ExportOutcome};
pub use store::{ScanPage, TableStore};

pub(crate) fn now_string() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
