mod update;

#[cfg(test)]
mod tests;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::TableState;
use tokio::sync::mpsc;

use artview_core::{Artwork, ArtworkId, PageRequests, SelectionController};

use crate::model::bulk::BulkPanelState;
use crate::model::sort::{SortOrder, sorted_rows};
use crate::model::status::{StatusKind, StatusMessage};
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    TextInput,
}

/// Main application state.
pub struct App {
    pub theme: Theme,
    /// Selection set, pending bulk target and the resident page window.
    pub selection: SelectionController,
    /// Tickets for page loads; only the latest response is applied.
    pub requests: PageRequests,
    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
    pub input_mode: InputMode,
    pub bulk: BulkPanelState,
    pub status: Option<StatusMessage>,
    /// Row under the cursor, as a position in `row_order`.
    pub row_cursor: usize,
    pub sort_order: SortOrder,
    pub sort_reversed: bool,
    /// Indices into the page window's records, in display order.
    pub row_order: Vec<usize>,
    /// Table scroll state, kept across frames so clicks map to rendered rows.
    pub table_state: TableState,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    /// Shown in the header so the user knows which collection is browsed.
    pub api_base: String,
    /// Last table area rendered (for mouse click → row mapping).
    pub last_table_area: Option<Rect>,
}

impl App {
    pub fn new(theme: Theme, api_base: String) -> Self {
        Self {
            theme,
            selection: SelectionController::new(),
            requests: PageRequests::default(),
            backend_cmd_tx: None,
            input_mode: InputMode::Normal,
            bulk: BulkPanelState::default(),
            status: None,
            row_cursor: 0,
            sort_order: SortOrder::default(),
            sort_reversed: false,
            row_order: Vec::new(),
            table_state: TableState::default(),
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            api_base,
            last_table_area: None,
        }
    }

    /// A page load is outstanding.
    pub fn loading(&self) -> bool {
        self.requests.in_flight()
    }

    /// Page currently displayed (0 before the first load lands).
    pub fn current_page(&self) -> u32 {
        self.selection.window().page
    }

    pub fn total_pages(&self) -> u32 {
        self.selection.window().total_pages()
    }

    /// Page the next relative navigation starts from: the pending request if
    /// there is one, otherwise the displayed page.
    fn navigation_base(&self) -> u32 {
        self.requests
            .pending_page()
            .unwrap_or_else(|| self.current_page().max(1))
    }

    /// Record shown at display position `row`.
    pub fn record_at(&self, row: usize) -> Option<&Artwork> {
        self.row_order
            .get(row)
            .and_then(|&i| self.selection.window().records.get(i))
    }

    pub fn cursor_record(&self) -> Option<&Artwork> {
        self.record_at(self.row_cursor)
    }

    /// Rebuild the display order after a sort change or a new page. The
    /// cursor follows `keep` if it is still on the page, otherwise it is
    /// clamped.
    pub(crate) fn refresh_row_order(&mut self, keep: Option<ArtworkId>) {
        self.row_order = sorted_rows(
            &self.selection.window().records,
            self.sort_order,
            self.sort_reversed,
        );
        let kept = keep.and_then(|id| {
            self.row_order
                .iter()
                .position(|&i| self.selection.window().records[i].id == id)
        });
        self.row_cursor = match kept {
            Some(pos) => pos,
            None => self.row_cursor.min(self.row_order.len().saturating_sub(1)),
        };
    }

    /// Request `page`, clamped to the known page range. Supersedes any load
    /// still in flight.
    pub fn go_to_page(&mut self, page: u32) {
        let total_pages = self.total_pages();
        let page = if total_pages > 0 {
            page.clamp(1, total_pages)
        } else {
            page.max(1)
        };

        let ticket = self.requests.begin(page);
        tracing::debug!(seq = ticket.seq, page, "requesting page");

        if let Some(tx) = &self.backend_cmd_tx
            && tx.send(BackendCommand::LoadPage { ticket }).is_err()
        {
            tracing::warn!(page, "backend is gone, cannot load page");
            self.requests.finish(ticket);
            self.post_error("Failed to load artworks: backend stopped");
        }
    }

    /// Move relative to the page being shown or requested. No-op at the edges.
    pub(crate) fn step_page(&mut self, forward: bool) {
        let base = self.navigation_base();
        let target = if forward {
            base.saturating_add(1)
        } else {
            base.saturating_sub(1)
        };
        let last = self.total_pages();
        if target == 0 || (last > 0 && target > last) {
            return;
        }
        self.go_to_page(target);
    }

    pub(crate) fn post_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::info(text, self.tick));
    }

    pub(crate) fn post_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::error(text, self.tick));
    }

    pub(crate) fn clear_error(&mut self) {
        if self
            .status
            .as_ref()
            .is_some_and(|s| s.kind == StatusKind::Error)
        {
            self.status = None;
        }
    }

    /// Render the whole frame.
    pub fn view(&mut self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::vertical([
            Constraint::Min(8),    // browse screen
            Constraint::Length(1), // key hints
        ])
        .split(area);

        crate::view::browse::render_in(f, self, chunks[0], chunks[1]);

        if self.bulk.active {
            crate::view::bulk_panel::render(f, &self.bulk, &self.selection, &self.theme);
        }
        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme);
        }
    }
}
