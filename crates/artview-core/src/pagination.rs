//! Page arithmetic for the paginator footer.

use std::ops::RangeInclusive;

/// Maximum number of page buttons shown in the footer.
pub const MAX_PAGES_SHOWN: u32 = 5;

/// `ceil(total / page_size)`; 0 when there is nothing to show.
pub fn total_pages(total: u64, page_size: usize) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total.div_ceil(page_size as u64);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// 1-based inclusive record range shown on `page`, e.g. `(13, 24)`.
///
/// Returns `(0, 0)` for an empty collection. The last page is clamped to
/// `total`.
pub fn display_range(page: u32, page_size: usize, total: u64) -> (u64, u64) {
    if total == 0 || page == 0 {
        return (0, 0);
    }
    let first = (page as u64 - 1) * page_size as u64 + 1;
    let last = (first + page_size as u64 - 1).min(total);
    (first.min(total), last)
}

/// Page numbers to render as buttons, centered on `current` where possible
/// and shifted at the edges so the window stays `max_pages` wide.
pub fn page_window(current: u32, total_pages: u32, max_pages: u32) -> RangeInclusive<u32> {
    if total_pages == 0 || max_pages == 0 {
        return 1..=0;
    }
    let current = current.clamp(1, total_pages);
    let mut start = current.saturating_sub(max_pages / 2).max(1);
    let end = (start + max_pages - 1).min(total_pages);
    if end - start < max_pages - 1 {
        start = end.saturating_sub(max_pages - 1).max(1);
    }
    start..=end
}
