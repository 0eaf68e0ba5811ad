//! Paginated full-table scan into an in-memory result set.

use crate::ExportResult;
use crate::core::{RawItem, ResultSet, unmarshall};
use crate::store::{Session, TableStore};

/// Result of draining a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutput {
    pub records: ResultSet,
    /// Number of scan requests issued
    pub pages: usize,
}

/// Drain every item of `table` from `store`.
///
/// The store is released once the scan loop ends, whether it succeeded or not.
pub async fn fetch_all<S: TableStore>(store: S, table: &str) -> ExportResult<ResultSet> {
    fetch_all_counted(store, table).await.map(|out| out.records)
}

/// Same as [`fetch_all`], also reporting how many scan requests were issued.
///
/// A scan error aborts the loop and is returned as is; nothing is retried.
/// A store that never stops returning a continuation key keeps this looping.
pub async fn fetch_all_counted<S: TableStore>(store: S, table: &str) -> ExportResult<FetchOutput> {
    let session = Session::open(store);
    let mut records = ResultSet::new();
    let mut last_evaluated_key: Option<RawItem> = None;
    let mut pages = 0usize;

    loop {
        let page = session.scan(table, last_evaluated_key.take()).await?;
        pages += 1;

        tracing::debug!(
            table,
            page = pages,
            items = page.items.len(),
            more = page.last_evaluated_key.is_some(),
            "scanned page"
        );

        records.extend(page.items.iter().map(|item| unmarshall(item)));

        match page.last_evaluated_key {
            Some(key) => last_evaluated_key = Some(key),
            None => break,
        }
    }

    tracing::info!(table, items = records.len(), pages, "scan complete");
    Ok(FetchOutput { records, pages })
}
