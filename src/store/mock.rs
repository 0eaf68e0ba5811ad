//! Mock table store for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::RawItem;
use crate::{ExportError, ExportResult};

use super::traits::{ScanPage, TableStore};

#[derive(Debug, Default)]
struct Calls {
    start_keys: Mutex<Vec<Option<RawItem>>>,
    releases: AtomicUsize,
}

/// Read-only view on what a [`MockStore`] saw, usable after the store itself was consumed.
#[derive(Debug, Clone)]
pub struct MockProbe {
    calls: Arc<Calls>,
}

impl MockProbe {
    /// Number of scan requests received.
    pub fn requests(&self) -> usize {
        self.start_keys().len()
    }

    /// Exclusive start key of every scan request, in order.
    pub fn start_keys(&self) -> Vec<Option<RawItem>> {
        self.calls
            .start_keys
            .lock()
            .map(|keys| keys.clone())
            .unwrap_or_default()
    }

    /// Number of times the store was released.
    pub fn releases(&self) -> usize {
        self.calls.releases.load(Ordering::SeqCst)
    }
}

/// Mock store serving canned pages in order.
///
/// Once the canned pages run out every further request returns an empty
/// final page.
pub struct MockStore {
    pages: Mutex<VecDeque<ScanPage>>,
    fail_on_request: Option<usize>,
    calls: Arc<Calls>,
}

impl MockStore {
    /// Create a mock store that answers with `pages`, one per request.
    pub fn new(pages: Vec<ScanPage>) -> Self {
        MockStore {
            pages: Mutex::new(pages.into()),
            fail_on_request: None,
            calls: Arc::new(Calls::default()),
        }
    }

    /// Make the `n`-th request (1-based) fail.
    pub fn fails_on_request(mut self, n: usize) -> Self {
        self.fail_on_request = Some(n);
        self
    }

    /// Handle for inspecting calls after the store is moved into a fetch.
    pub fn probe(&self) -> MockProbe {
        MockProbe { calls: Arc::clone(&self.calls) }
    }
}

#[async_trait]
impl TableStore for MockStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn scan(&self, table: &str, exclusive_start_key: Option<RawItem>) -> ExportResult<ScanPage> {
        let request = {
            let mut keys = self
                .calls
                .start_keys
                .lock()
                .map_err(|_| ExportError::Message("mock call log poisoned".into()))?;
            keys.push(exclusive_start_key);
            keys.len()
        };

        if self.fail_on_request == Some(request) {
            return Err(ExportError::Scan {
                table: table.to_string(),
                message: "mock scan failed".into(),
            });
        }

        let mut pages = self
            .pages
            .lock()
            .map_err(|_| ExportError::Message("mock pages poisoned".into()))?;
        Ok(pages.pop_front().unwrap_or_default())
    }

    fn release(&mut self) {
        self.calls.releases.fetch_add(1, Ordering::SeqCst);
    }
}
