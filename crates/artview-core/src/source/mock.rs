//! In-memory page source for tests and offline demos.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{FetchError, PageSource};
use crate::PAGE_SIZE;
use crate::record::{Artwork, ArtworkPage, Pagination};

/// A hand-rolled [`PageSource`] serving a fixed collection in pages of
/// [`PAGE_SIZE`].
///
/// Supports:
/// - Failing specific pages with an HTTP status.
/// - Optional per-call latency.
/// - Call counting and a log of requested pages.
pub struct MockSource {
    records: Vec<Artwork>,
    failing: HashSet<u32>,
    fail_status: u16,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    requested: Mutex<Vec<u32>>,
}

impl MockSource {
    /// A collection of `total` artworks with ids `1..=total`.
    pub fn sequential(total: u64) -> Self {
        Self::from_records((1..=total).map(Artwork::with_id).collect())
    }

    pub fn from_records(records: Vec<Artwork>) -> Self {
        Self {
            records,
            failing: HashSet::new(),
            fail_status: 500,
            delay: None,
            call_count: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Make `page` fail with `status`.
    pub fn failing_page(mut self, page: u32, status: u16) -> Self {
        self.failing.insert(page);
        self.fail_status = status;
        self
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `fetch_page()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Pages requested so far, in call order.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested
            .lock()
            .map(|pages| pages.clone())
            .unwrap_or_default()
    }

    /// Synchronous page slice, shared by the async path and by callers that
    /// don't need a runtime.
    pub fn page(&self, page: u32) -> Result<ArtworkPage, FetchError> {
        if page == 0 {
            return Err(FetchError::InvalidPage(page));
        }
        if self.failing.contains(&page) {
            return Err(FetchError::Status(self.fail_status));
        }
        let start = (page as usize - 1).saturating_mul(PAGE_SIZE);
        let data = self
            .records
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .collect();
        Ok(ArtworkPage {
            data,
            pagination: Pagination {
                total: self.records.len() as u64,
            },
        })
    }
}

impl PageSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch_page<'a>(
        &'a self,
        page: u32,
    ) -> Pin<Box<dyn Future<Output = Result<ArtworkPage, FetchError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(page);
        }
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            self.page(page)
        })
    }
}
