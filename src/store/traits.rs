//! Table store trait and the scoped session that owns a store handle.

use std::ops::Deref;

use async_trait::async_trait;

use crate::ExportResult;
use crate::core::RawItem;

/// One batch returned by a scan request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    /// Store-encoded items, in scan order
    pub items: Vec<RawItem>,
    /// Continuation key; `None` once the table is exhausted
    pub last_evaluated_key: Option<RawItem>,
}

impl ScanPage {
    /// A page with no continuation key.
    pub fn last(items: Vec<RawItem>) -> Self {
        ScanPage { items, last_evaluated_key: None }
    }

    /// A page that asks the caller to resume from `key`.
    pub fn with_key(items: Vec<RawItem>, key: RawItem) -> Self {
        ScanPage { items, last_evaluated_key: Some(key) }
    }
}

/// A remote key-value table store that supports paginated full-table scans.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Returns the store name (e.g., "dynamodb", "mock").
    fn name(&self) -> &str;

    /// Issue a single scan request.
    ///
    /// # Arguments
    /// * `table` - Table to scan
    /// * `exclusive_start_key` - Continuation key from the previous page, if any
    async fn scan(&self, table: &str, exclusive_start_key: Option<RawItem>) -> ExportResult<ScanPage>;

    /// Release the connection held by this store.
    fn release(&mut self);
}

/// Owns a store for the duration of one fetch and releases it when dropped.
///
/// The release runs exactly once, whether the holder returns normally,
/// bails out with an error or unwinds.
pub struct Session<S: TableStore> {
    store: S,
}

impl<S: TableStore> Session<S> {
    pub fn open(store: S) -> Self {
        tracing::debug!(store = store.name(), "opened table store session");
        Session { store }
    }
}

impl<S: TableStore> Deref for Session<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.store
    }
}

impl<S: TableStore> Drop for Session<S> {
    fn drop(&mut self) {
        self.store.release();
        tracing::debug!(store = self.store.name(), "released table store session");
    }
}
