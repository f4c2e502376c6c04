//! The resident page window and "last request wins" bookkeeping for loads.

use crate::PAGE_SIZE;
use crate::pagination;
use crate::record::{Artwork, ArtworkId, ArtworkPage};
use crate::source::{FetchError, PageSource};

/// The records currently fetched and displayed. Replaced wholesale on
/// navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number; 0 only for the empty window before first load.
    pub page: u32,
    pub records: Vec<Artwork>,
    /// Collection-wide record count reported with this page.
    pub total: u64,
}

impl PageWindow {
    pub fn new(page: u32, fetched: ArtworkPage) -> Self {
        Self {
            page,
            total: fetched.total(),
            records: fetched.data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Record ids in page order.
    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.records.iter().map(|r| r.id)
    }

    pub fn contains(&self, id: ArtworkId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn total_pages(&self) -> u32 {
        pagination::total_pages(self.total, PAGE_SIZE)
    }

    /// True when no page after this one can hold records.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages()
    }
}

/// Fetch `page` from `source` and wrap it as a window.
pub async fn load_page(source: &dyn PageSource, page: u32) -> Result<PageWindow, FetchError> {
    tracing::debug!(source = source.name(), page, "loading page");
    let fetched = source.fetch_page(page).await?;
    Ok(PageWindow::new(page, fetched))
}

/// Identifies one page load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub page: u32,
}

/// Issues tickets for page loads and accepts only the most recent one.
///
/// A response carrying an older ticket arrived late and must not touch the
/// page window.
#[derive(Debug, Default)]
pub struct PageRequests {
    next_seq: u64,
    latest: Option<LoadTicket>,
}

impl PageRequests {
    /// Start a new load; any earlier ticket becomes stale.
    pub fn begin(&mut self, page: u32) -> LoadTicket {
        self.next_seq += 1;
        let ticket = LoadTicket {
            seq: self.next_seq,
            page,
        };
        self.latest = Some(ticket);
        ticket
    }

    /// Whether a response for `ticket` may be applied.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest == Some(ticket)
    }

    /// Mark `ticket` as finished. Returns false (and changes nothing) for a
    /// stale ticket.
    pub fn finish(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(seq = ticket.seq, page = ticket.page, "dropping stale page response");
            return false;
        }
        self.latest = None;
        true
    }

    /// A load is outstanding.
    pub fn in_flight(&self) -> bool {
        self.latest.is_some()
    }

    /// Page of the outstanding load, if any.
    pub fn pending_page(&self) -> Option<u32> {
        self.latest.map(|t| t.page)
    }
}
