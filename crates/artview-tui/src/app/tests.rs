use tokio::sync::mpsc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use artview_core::source::mock::MockSource;
use artview_core::{Artwork, ArtworkId, LoadTicket, PageWindow};

use super::*;
use crate::action::Action;
use crate::model::sort::SortOrder;
use crate::model::status::StatusKind;
use crate::tui_event::BackendEvent;

/// Create an App wired to a command channel the test drains by hand.
fn test_app() -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(Theme::gallery(), "http://test.invalid/artworks".to_string());
    app.backend_cmd_tx = Some(tx);
    (app, rx)
}

/// Pop the load request the app just issued.
fn next_ticket(rx: &mut mpsc::UnboundedReceiver<BackendCommand>) -> LoadTicket {
    match rx.try_recv().expect("a load command was sent") {
        BackendCommand::LoadPage { ticket } => ticket,
    }
}

fn deliver(app: &mut App, source: &MockSource, ticket: LoadTicket) {
    let page = source.page(ticket.page).unwrap();
    app.handle_backend_event(BackendEvent::PageLoaded {
        ticket,
        window: PageWindow::new(ticket.page, page),
    });
}

/// Request `page` and deliver it immediately.
fn show_page(
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<BackendCommand>,
    source: &MockSource,
    page: u32,
) {
    app.go_to_page(page);
    let ticket = next_ticket(rx);
    deliver(app, source, ticket);
}

fn type_count(app: &mut App, input: &str) {
    app.update(Action::OpenBulkPanel);
    for c in input.chars() {
        app.update(Action::InputChar(c));
    }
    app.update(Action::InputConfirm);
}

// ── Page loading ───────────────────────────────────────────────

#[test]
fn first_load_fills_the_table() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);

    app.go_to_page(1);
    assert!(app.loading());
    deliver(&mut app, &source, next_ticket(&mut rx));

    assert!(!app.loading());
    assert_eq!(app.current_page(), 1);
    assert_eq!(app.selection.window().len(), 12);
    assert_eq!(app.total_pages(), 9);
}

#[test]
fn superseded_response_is_dropped() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);

    app.update(Action::NextPage);
    let slow = next_ticket(&mut rx);
    app.update(Action::NextPage);
    let fast = next_ticket(&mut rx);
    assert_eq!((slow.page, fast.page), (2, 3));

    deliver(&mut app, &source, fast);
    deliver(&mut app, &source, slow);

    assert_eq!(app.current_page(), 3);
    assert!(app.selection.window().contains(ArtworkId(25)));
}

#[test]
fn failed_load_keeps_rows_and_posts_error() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);

    app.update(Action::NextPage);
    let ticket = next_ticket(&mut rx);
    app.handle_backend_event(BackendEvent::PageFailed {
        ticket,
        error: "HTTP error! status: 500".to_string(),
    });

    assert!(!app.loading());
    assert_eq!(app.current_page(), 1);
    assert_eq!(app.selection.window().len(), 12);
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "Failed to load artworks: HTTP error! status: 500");

    // A later successful load clears the error.
    app.update(Action::Reload);
    deliver(&mut app, &source, next_ticket(&mut rx));
    assert!(app.status.is_none());
}

#[test]
fn next_page_stops_at_last_page() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(20);
    show_page(&mut app, &mut rx, &source, 1);

    app.update(Action::NextPage);
    deliver(&mut app, &source, next_ticket(&mut rx));
    assert_eq!(app.current_page(), 2);

    app.update(Action::NextPage);
    assert!(rx.try_recv().is_err());
    assert!(!app.loading());
}

#[test]
fn prev_page_on_first_page_is_noop() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(20);
    show_page(&mut app, &mut rx, &source, 1);

    app.update(Action::PrevPage);
    assert!(rx.try_recv().is_err());
}

#[test]
fn last_page_jumps_to_the_end() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);

    app.update(Action::LastPage);
    assert_eq!(next_ticket(&mut rx).page, 9);
}

#[test]
fn backend_gone_reports_error() {
    let (mut app, rx) = test_app();
    drop(rx);

    app.go_to_page(1);

    assert!(!app.loading());
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
}

// ── Row selection ──────────────────────────────────────────────

#[test]
fn toggle_row_under_cursor() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);

    app.update(Action::MoveDown);
    app.update(Action::ToggleRow);
    assert!(app.selection.is_selected(ArtworkId(2)));

    app.update(Action::ToggleRow);
    assert_eq!(app.selection.selected_count(), 0);
}

#[test]
fn cursor_stays_on_the_page() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(14);
    show_page(&mut app, &mut rx, &source, 1);

    for _ in 0..20 {
        app.update(Action::MoveDown);
    }
    assert_eq!(app.row_cursor, 11);

    // Page 2 holds only two rows.
    app.update(Action::NextPage);
    deliver(&mut app, &source, next_ticket(&mut rx));
    assert_eq!(app.row_cursor, 1);
}

#[test]
fn click_toggles_the_clicked_row() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);
    app.last_table_area = Some(Rect::new(0, 2, 100, 16));

    // Border and header take two lines, so y = 6 is the third row.
    app.update(Action::ClickAt(10, 6));
    assert_eq!(app.row_cursor, 2);
    assert!(app.selection.is_selected(ArtworkId(3)));

    // Clicks on the header are ignored.
    app.update(Action::ClickAt(10, 3));
    assert_eq!(app.selection.selected_count(), 1);
}

#[test]
fn selections_survive_page_changes() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);
    app.update(Action::ToggleAllOnPage);

    show_page(&mut app, &mut rx, &source, 2);
    app.update(Action::ToggleRow);
    assert_eq!(app.selection.selected_count(), 13);

    show_page(&mut app, &mut rx, &source, 1);
    assert_eq!(app.selection.selected_on_page().len(), 12);
}

#[test]
fn clear_drops_everything() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);
    type_count(&mut app, "30");
    assert!(app.selection.is_pursuing());

    app.update(Action::ClearSelection);
    assert_eq!(app.selection.selected_count(), 0);
    assert!(!app.selection.is_pursuing());
}

#[test]
fn click_after_scrolling_toggles_the_visible_row() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);

    // 12 lines tall: the table gets 8 lines, so only 5 rows fit.
    let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
    for _ in 0..11 {
        app.update(Action::MoveDown);
    }
    terminal.draw(|f| app.view(f)).unwrap();

    let area = app.last_table_area.unwrap();
    let offset = app.table_state.offset();
    assert!(offset > 0, "table should have scrolled to show row 11");
    let first_visible = app.record_at(offset).unwrap().id;

    app.update(Action::ClickAt(area.x + 10, area.y + 2));

    assert_eq!(app.selection.selected_ids(), vec![first_visible]);
    assert!(!app.selection.is_selected(ArtworkId(1)));
    assert_eq!(app.row_cursor, offset);
}

#[test]
fn click_on_bottom_border_is_ignored() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);

    let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
    terminal.draw(|f| app.view(f)).unwrap();
    let area = app.last_table_area.unwrap();

    app.update(Action::ClickAt(area.x + 10, area.y + area.height - 1));
    assert_eq!(app.selection.selected_count(), 0);
}

// ── Display sort ───────────────────────────────────────────────

/// Titles run backwards relative to ids, so a title sort reverses the page.
fn titled_source() -> MockSource {
    MockSource::from_records(
        (1..=30)
            .map(|id| {
                let mut art = Artwork::with_id(id);
                art.title = Some(format!("Study {:03}", 100 - id));
                art
            })
            .collect(),
    )
}

#[test]
fn sort_reorders_rows_and_cursor_follows_its_record() {
    let (mut app, mut rx) = test_app();
    let source = titled_source();
    show_page(&mut app, &mut rx, &source, 1);
    app.update(Action::MoveDown);
    app.update(Action::MoveDown);
    assert_eq!(app.cursor_record().unwrap().id, ArtworkId(3));

    app.update(Action::CycleSort);
    assert_eq!(app.sort_order, SortOrder::Title);
    assert_eq!(app.record_at(0).unwrap().id, ArtworkId(12));
    assert_eq!(app.row_cursor, 9);
    assert_eq!(app.cursor_record().unwrap().id, ArtworkId(3));

    app.update(Action::ToggleRow);
    assert_eq!(app.selection.selected_ids(), vec![ArtworkId(3)]);

    // The page window itself keeps API order.
    assert_eq!(app.selection.window().records[0].id, ArtworkId(1));

    app.update(Action::ReverseSortDirection);
    assert_eq!(app.record_at(0).unwrap().id, ArtworkId(1));
    assert_eq!(app.cursor_record().unwrap().id, ArtworkId(3));
}

#[test]
fn sort_carries_over_to_the_next_page() {
    let (mut app, mut rx) = test_app();
    let source = titled_source();
    show_page(&mut app, &mut rx, &source, 1);
    app.update(Action::CycleSort);

    app.update(Action::NextPage);
    deliver(&mut app, &source, next_ticket(&mut rx));

    assert_eq!(app.record_at(0).unwrap().id, ArtworkId(24));
    assert_eq!(app.record_at(11).unwrap().id, ArtworkId(13));
}

#[test]
fn sorting_never_changes_what_bulk_select_picks() {
    let source = titled_source();
    let run = |sorted: bool| {
        let (mut app, mut rx) = test_app();
        show_page(&mut app, &mut rx, &source, 1);
        if sorted {
            app.update(Action::CycleSort);
            assert_eq!(app.record_at(0).unwrap().id, ArtworkId(12));
        }
        type_count(&mut app, "15");
        app.update(Action::NextPage);
        deliver(&mut app, &source, next_ticket(&mut rx));
        assert!(!app.selection.is_pursuing());
        app.selection.selected_ids()
    };

    let plain = run(false);
    assert_eq!(plain, (1..=15).map(ArtworkId).collect::<Vec<_>>());
    assert_eq!(run(true), plain);
}

#[test]
fn toggle_all_under_sort_matches_page() {
    let (mut app, mut rx) = test_app();
    let source = titled_source();
    show_page(&mut app, &mut rx, &source, 1);
    app.update(Action::CycleSort);

    app.update(Action::ToggleAllOnPage);
    assert_eq!(app.selection.selected_ids(), (1..=12).map(ArtworkId).collect::<Vec<_>>());
}

// ── Bulk panel ─────────────────────────────────────────────────

#[test]
fn bulk_select_spans_pages() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);

    type_count(&mut app, "20");
    assert!(!app.bulk.active);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.selection.selected_count(), 12);
    assert!(app.selection.is_pursuing());
    assert!(
        app.status
            .as_ref()
            .unwrap()
            .text
            .contains("complete by page 2")
    );

    app.update(Action::NextPage);
    deliver(&mut app, &source, next_ticket(&mut rx));

    assert_eq!(app.selection.selected_count(), 20);
    assert!(!app.selection.is_pursuing());
    assert_eq!(
        app.status.as_ref().unwrap().text,
        "Auto-selected 8 rows from page 2"
    );
}

#[test]
fn invalid_count_keeps_panel_open() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);

    type_count(&mut app, "0");

    assert!(app.bulk.active);
    assert_eq!(app.input_mode, InputMode::TextInput);
    assert_eq!(
        app.bulk.error.as_deref(),
        Some("Please enter a valid number greater than 0")
    );
    assert_eq!(app.selection.selected_count(), 0);
    assert!(!app.selection.is_pursuing());

    // Typing again clears the message; a valid count then applies.
    app.update(Action::InputBackspace);
    app.update(Action::InputChar('5'));
    assert!(app.bulk.error.is_none());
    app.update(Action::InputConfirm);
    assert!(!app.bulk.active);
    assert_eq!(app.selection.selected_count(), 5);
}

#[test]
fn empty_input_is_rejected() {
    let (mut app, _rx) = test_app();
    type_count(&mut app, "");
    assert!(app.bulk.active);
    assert!(app.bulk.error.is_some());
}

#[test]
fn cancel_leaves_selection_untouched() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);

    app.update(Action::OpenBulkPanel);
    app.update(Action::InputChar('7'));
    app.update(Action::InputCancel);

    assert!(!app.bulk.active);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.selection.selected_count(), 0);
}

#[test]
fn bulk_deselect_touches_only_this_page() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);
    app.update(Action::ToggleAllOnPage);
    show_page(&mut app, &mut rx, &source, 2);
    app.update(Action::ToggleAllOnPage);

    app.update(Action::OpenBulkPanel);
    app.update(Action::ToggleBulkMode);
    app.update(Action::InputChar('5'));
    app.update(Action::InputConfirm);

    assert_eq!(app.selection.selected_count(), 19);
    assert_eq!(app.selection.selected_on_page().len(), 7);
    assert!(app.selection.is_selected(ArtworkId(1)));
}

#[test]
fn manual_deselect_cancels_pursuit() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);
    type_count(&mut app, "30");

    app.update(Action::ToggleRow);
    assert!(!app.selection.is_pursuing());
    assert_eq!(app.selection.selected_count(), 11);

    app.update(Action::NextPage);
    deliver(&mut app, &source, next_ticket(&mut rx));
    assert_eq!(app.selection.selected_count(), 11);
}

// ── Modals ─────────────────────────────────────────────────────

#[test]
fn quit_requires_confirmation() {
    let (mut app, _rx) = test_app();

    assert!(!app.update(Action::Quit));
    assert!(app.confirm_quit);
    assert!(!app.should_quit);

    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}

#[test]
fn esc_cancels_quit() {
    let (mut app, _rx) = test_app();
    app.update(Action::Quit);
    app.update(Action::NavigateBack);
    assert!(!app.confirm_quit);
    assert!(!app.should_quit);
}

#[test]
fn help_swallows_navigation() {
    let (mut app, mut rx) = test_app();
    let source = MockSource::sequential(100);
    show_page(&mut app, &mut rx, &source, 1);

    app.update(Action::ToggleHelp);
    app.update(Action::NextPage);
    assert!(rx.try_recv().is_err());

    app.update(Action::ToggleHelp);
    assert!(!app.show_help);
}

#[test]
fn info_status_expires_after_ticks() {
    let (mut app, _rx) = test_app();
    app.post_info("hello");
    for _ in 0..=crate::model::status::INFO_TTL_TICKS {
        app.update(Action::Tick);
    }
    assert!(app.status.is_none());
}
