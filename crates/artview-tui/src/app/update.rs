use super::{App, InputMode};
use crate::action::Action;
use crate::model::bulk::BulkMode;
use crate::tui_event::BackendEvent;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        if action == Action::Tick {
            self.on_tick();
            return false;
        }

        // Quit confirmation modal — q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack | Action::InputCancel => {
                    self.confirm_quit = false;
                }
                _ => {}
            }
            return false;
        }

        if self.bulk.active {
            return self.update_bulk_panel(action);
        }

        if self.show_help {
            match action {
                Action::ToggleHelp | Action::NavigateBack => self.show_help = false,
                Action::Quit => self.confirm_quit = true,
                _ => {}
            }
            return false;
        }

        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::MoveDown => {
                let len = self.selection.window().len();
                if len > 0 {
                    self.row_cursor = (self.row_cursor + 1).min(len - 1);
                }
            }
            Action::MoveUp => {
                self.row_cursor = self.row_cursor.saturating_sub(1);
            }
            Action::ClickAt(x, y) => self.handle_click(x, y),
            Action::PrevPage => self.step_page(false),
            Action::NextPage => self.step_page(true),
            Action::FirstPage => self.go_to_page(1),
            Action::LastPage => {
                let last = self.total_pages();
                if last > 0 {
                    self.go_to_page(last);
                }
            }
            Action::Reload => {
                let page = self.current_page().max(1);
                self.go_to_page(page);
            }
            Action::ToggleRow => self.toggle_cursor_row(),
            Action::ToggleAllOnPage => {
                let toggle = self.selection.toggle_all_on_page();
                if toggle.cancelled_pursuit {
                    self.post_info("Deselection cancelled the pending bulk selection");
                }
            }
            Action::ClearSelection => {
                let cleared = self.selection.selected_count();
                self.selection.clear();
                self.post_info(format!("Cleared {cleared} selected rows"));
            }
            Action::CycleSort => {
                self.sort_order = self.sort_order.next();
                self.sort_reversed = false;
                let keep = self.cursor_record().map(|r| r.id);
                self.refresh_row_order(keep);
            }
            Action::ReverseSortDirection => {
                self.sort_reversed = !self.sort_reversed;
                let keep = self.cursor_record().map(|r| r.id);
                self.refresh_row_order(keep);
            }
            Action::OpenBulkPanel => {
                self.bulk.open();
                self.input_mode = InputMode::TextInput;
            }
            Action::ToggleHelp => self.show_help = true,
            Action::NavigateBack => {
                if self.status.is_some() {
                    self.status = None;
                }
            }
            _ => {}
        }
        false
    }

    fn update_bulk_panel(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return true;
            }
            Action::InputChar(c) => self.bulk.push_char(c),
            Action::InputBackspace => self.bulk.backspace(),
            Action::ToggleBulkMode => {
                self.bulk.mode = self.bulk.mode.toggled();
                self.bulk.error = None;
            }
            Action::InputCancel | Action::NavigateBack => self.close_bulk_panel(),
            Action::InputConfirm => {
                // Validation failure keeps the panel open with the message.
                let Ok(count) = self.bulk.parse() else {
                    return false;
                };
                match self.bulk.mode {
                    BulkMode::Select => {
                        let added = self.selection.request_bulk_select(count);
                        match (self.selection.pursuit(), self.selection.completion_page_hint()) {
                            (Some(p), Some(page)) => self.post_info(format!(
                                "Selected {} rows here; selecting {} across pages, complete by page {}",
                                added.len(),
                                p.target,
                                page
                            )),
                            _ => self.post_info(format!("Selected {} rows", added.len())),
                        }
                    }
                    BulkMode::Deselect => {
                        let removed = self.selection.request_bulk_deselect(count);
                        self.post_info(format!("Deselected {} rows on this page", removed.len()));
                    }
                }
                self.close_bulk_panel();
            }
            _ => {}
        }
        false
    }

    fn close_bulk_panel(&mut self) {
        self.bulk.close();
        self.input_mode = InputMode::Normal;
    }

    fn toggle_cursor_row(&mut self) {
        let Some(id) = self.cursor_record().map(|r| r.id) else {
            return;
        };
        let toggle = self.selection.toggle_row(id);
        if toggle.cancelled_pursuit {
            self.post_info("Deselection cancelled the pending bulk selection");
        }
    }

    /// Map a click inside the table to a row and toggle it.
    fn handle_click(&mut self, x: u16, y: u16) {
        let Some(area) = self.last_table_area else {
            return;
        };
        // Top border plus header row; the bottom border is not a row.
        let first_row_y = area.y + 2;
        let last_row_y = (area.y + area.height).saturating_sub(1);
        if x < area.x || x >= area.x + area.width || y < first_row_y || y >= last_row_y {
            return;
        }
        let row = self.table_state.offset() + (y - first_row_y) as usize;
        if row < self.row_order.len() {
            self.row_cursor = row;
            self.toggle_cursor_row();
        }
    }

    fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if self.status.as_ref().is_some_and(|s| s.expired(self.tick)) {
            self.status = None;
        }
    }

    /// Apply a backend event. Responses for superseded loads are dropped.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::PageLoaded { ticket, window } => {
                if !self.requests.finish(ticket) {
                    return;
                }
                let page = window.page;
                let added = self.selection.on_page_loaded(window);
                *self.table_state.offset_mut() = 0;
                self.refresh_row_order(None);
                self.clear_error();
                if !added.is_empty() {
                    self.post_info(format!("Auto-selected {} rows from page {}", added.len(), page));
                }
            }
            BackendEvent::PageFailed { ticket, error } => {
                if !self.requests.finish(ticket) {
                    return;
                }
                self.post_error(format!("Failed to load artworks: {error}"));
            }
        }
    }
}
