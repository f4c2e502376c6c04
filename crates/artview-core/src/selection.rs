//! Cross-page selection bookkeeping.
//!
//! The [`SelectionController`] owns the global selection set and the page
//! window it is reconciled against. Only one page of records is resident at a
//! time, so a bulk request for more rows than the visible page holds is kept
//! as a pending target and topped up every time a new page window is
//! delivered (see [`SelectionController::on_page_loaded`]).
//!
//! Policy:
//! - A bulk target counts the whole selection set, including rows selected
//!   on other pages. The selection is never cleared by a bulk request.
//! - The target saturates at the collection total of the visible window.
//! - A page already scanned during a pursuit is not scanned again.
//! - A manual deselection on the visible page cancels the pursuit; a bulk
//!   deselection does not.

use std::collections::{BTreeSet, HashSet};
use std::num::NonZeroUsize;

use thiserror::Error;

use crate::PAGE_SIZE;
use crate::pager::PageWindow;
use crate::record::ArtworkId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please enter a valid number greater than 0")]
    InvalidCount,
}

/// A validated, strictly positive row count for bulk operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkCount(NonZeroUsize);

impl BulkCount {
    pub fn new(n: usize) -> Result<Self, SelectionError> {
        NonZeroUsize::new(n)
            .map(Self)
            .ok_or(SelectionError::InvalidCount)
    }

    /// Parse user input. Empty, non-numeric, negative, zero and
    /// out-of-range values are all rejected the same way.
    pub fn parse(input: &str) -> Result<Self, SelectionError> {
        let n: usize = input
            .trim()
            .parse()
            .map_err(|_| SelectionError::InvalidCount)?;
        Self::new(n)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Whether a bulk selection is still being pursued across pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PursuitState {
    #[default]
    Idle,
    Pursuing {
        /// Requested total, before saturation.
        target: usize,
        /// Pages already topped up from during this pursuit.
        scanned: BTreeSet<u32>,
    },
}

/// Snapshot of an active pursuit for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pursuit {
    pub target: usize,
    pub remaining: usize,
}

/// Outcome of reconciling a checkbox change on the visible page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageToggle {
    /// Rows of this page selected before the change.
    pub before: usize,
    /// Rows of this page selected after the change.
    pub after: usize,
    /// A pending bulk target was cancelled by this change.
    pub cancelled_pursuit: bool,
}

#[derive(Debug, Default)]
pub struct SelectionController {
    selected: HashSet<ArtworkId>,
    window: PageWindow,
    state: PursuitState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    pub fn state(&self) -> &PursuitState {
        &self.state
    }

    pub fn is_pursuing(&self) -> bool {
        matches!(self.state, PursuitState::Pursuing { .. })
    }

    pub fn pursuit(&self) -> Option<Pursuit> {
        match &self.state {
            PursuitState::Idle => None,
            PursuitState::Pursuing { target, .. } => Some(Pursuit {
                target: *target,
                remaining: self.effective_target(*target).saturating_sub(self.selected.len()),
            }),
        }
    }

    /// Page by which the pending target completes if every page is full,
    /// i.e. `ceil(target / page_size)`.
    pub fn completion_page_hint(&self) -> Option<u32> {
        match &self.state {
            PursuitState::Idle => None,
            PursuitState::Pursuing { target, .. } => {
                Some(crate::pagination::total_pages(*target as u64, PAGE_SIZE))
            }
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.selected.contains(&id)
    }

    /// All selected ids, sorted for stable output.
    pub fn selected_ids(&self) -> Vec<ArtworkId> {
        let mut ids: Vec<ArtworkId> = self.selected.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Selected ids present on the visible page, in page order.
    pub fn selected_on_page(&self) -> Vec<ArtworkId> {
        self.window
            .ids()
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    /// Reconcile the visible page against the full set of ids the table
    /// reports as checked on it.
    ///
    /// Every id of the page is removed first, then exactly the checked ids
    /// are added back. Ids not on the page are ignored.
    pub fn set_page_selection<I>(&mut self, checked: I) -> PageToggle
    where
        I: IntoIterator<Item = ArtworkId>,
    {
        let before = self.selected_on_page().len();

        let checked: HashSet<ArtworkId> = checked.into_iter().collect();
        let page_ids: Vec<ArtworkId> = self.window.ids().collect();
        for id in &page_ids {
            self.selected.remove(id);
        }
        for id in page_ids.iter().filter(|id| checked.contains(id)) {
            self.selected.insert(*id);
        }
        if checked.len() > page_ids.iter().filter(|id| checked.contains(id)).count() {
            tracing::debug!(page = self.window.page, "ignoring checked ids outside the visible page");
        }

        let after = self.selected_on_page().len();
        let mut cancelled_pursuit = false;
        if after < before && self.is_pursuing() {
            tracing::info!(page = self.window.page, "manual deselection cancelled bulk selection");
            self.state = PursuitState::Idle;
            cancelled_pursuit = true;
        } else {
            self.settle();
        }

        PageToggle {
            before,
            after,
            cancelled_pursuit,
        }
    }

    /// Flip one row's checkbox on the visible page.
    pub fn toggle_row(&mut self, id: ArtworkId) -> PageToggle {
        let mut checked = self.selected_on_page();
        if let Some(pos) = checked.iter().position(|c| *c == id) {
            checked.remove(pos);
        } else {
            checked.push(id);
        }
        self.set_page_selection(checked)
    }

    /// Header checkbox: check every row, or uncheck all if all are checked.
    pub fn toggle_all_on_page(&mut self) -> PageToggle {
        let all_checked = !self.window.is_empty()
            && self.window.ids().all(|id| self.selected.contains(&id));
        if all_checked {
            self.set_page_selection(std::iter::empty())
        } else {
            let ids: Vec<ArtworkId> = self.window.ids().collect();
            self.set_page_selection(ids)
        }
    }

    /// Start pursuing `count` selected rows in total. Returns the ids added
    /// from the visible page.
    pub fn request_bulk_select(&mut self, count: BulkCount) -> Vec<ArtworkId> {
        let target = count.get();
        tracing::info!(target, page = self.window.page, "bulk selection requested");
        self.state = PursuitState::Pursuing {
            target,
            scanned: BTreeSet::new(),
        };
        if self.window.is_empty() {
            tracing::info!(target, "no records to select from, bulk selection ends");
            self.state = PursuitState::Idle;
            return Vec::new();
        }
        self.scan_window()
    }

    /// Remove up to `count` selected rows of the visible page, in page order.
    /// Rows selected on other pages and any pending pursuit are untouched.
    pub fn request_bulk_deselect(&mut self, count: BulkCount) -> Vec<ArtworkId> {
        let removed: Vec<ArtworkId> = self
            .selected_on_page()
            .into_iter()
            .take(count.get())
            .collect();
        for id in &removed {
            self.selected.remove(id);
        }
        tracing::info!(page = self.window.page, removed = removed.len(), "bulk deselection");
        removed
    }

    /// Replace the page window. While pursuing, top up from the new page.
    /// Returns the ids added.
    pub fn on_page_loaded(&mut self, window: PageWindow) -> Vec<ArtworkId> {
        self.window = window;
        if !self.is_pursuing() {
            return Vec::new();
        }
        if self.window.is_empty() || self.window.page > self.window.total_pages() {
            tracing::info!(page = self.window.page, "data source exhausted, bulk selection ends");
            self.state = PursuitState::Idle;
            return Vec::new();
        }
        self.scan_window()
    }

    /// Drop every selection and any pending target.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.state = PursuitState::Idle;
    }

    fn effective_target(&self, target: usize) -> usize {
        let total = usize::try_from(self.window.total).unwrap_or(usize::MAX);
        target.min(total)
    }

    /// Top up from the visible page unless it was already scanned, then
    /// settle the pursuit.
    fn scan_window(&mut self) -> Vec<ArtworkId> {
        let page = self.window.page;
        let total_pages = self.window.total_pages();
        let (target, first_visit, all_scanned) = match &mut self.state {
            PursuitState::Idle => return Vec::new(),
            PursuitState::Pursuing { target, scanned } => {
                let first_visit = scanned.insert(page);
                let all_scanned = scanned.len() >= total_pages as usize;
                (*target, first_visit, all_scanned)
            }
        };

        let mut added = Vec::new();
        if first_visit {
            let mut needed = self.effective_target(target).saturating_sub(self.selected.len());
            for id in self.window.ids() {
                if needed == 0 {
                    break;
                }
                if self.selected.insert(id) {
                    added.push(id);
                    needed -= 1;
                }
            }
            tracing::debug!(page, added = added.len(), selected = self.selected.len(), "topped up selection");
        }

        self.settle();
        if self.is_pursuing() && all_scanned {
            tracing::info!(target, selected = self.selected.len(), "every page scanned, bulk selection ends");
            self.state = PursuitState::Idle;
        }
        added
    }

    /// Return to idle once the saturated target is met.
    fn settle(&mut self) {
        if let PursuitState::Pursuing { target, .. } = self.state
            && self.selected.len() >= self.effective_target(target)
        {
            tracing::info!(target, selected = self.selected.len(), "bulk selection satisfied");
            self.state = PursuitState::Idle;
        }
    }
}
