use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use artview_core::PAGE_SIZE;
use artview_core::pagination::{MAX_PAGES_SHOWN, display_range, page_window};

use crate::app::App;
use crate::model::sort::SortOrder;
use crate::model::status::StatusKind;
use crate::theme::Theme;
use crate::view::{spinner_char, truncate};

/// Render the browse screen into the given area.
/// `footer_area` is the full-width key-hint row below it.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect, footer_area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(1), // status line
        Constraint::Min(4),    // table
        Constraint::Length(1), // paginator
    ])
    .split(area);

    render_header(f, chunks[0], app);
    render_status(f, chunks[1], app);
    render_table(f, chunks[2], app);
    app.last_table_area = Some(chunks[2]);
    render_paginator(f, chunks[3], app);
    render_footer(f, footer_area, &app.theme);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let selection = &app.selection;

    let mut spans = vec![
        Span::styled(" artview ", theme.header_style()),
        Span::styled(
            format!(" Selected: {} rows", selection.selected_count()),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ];

    if let (Some(pursuit), Some(page)) = (selection.pursuit(), selection.completion_page_hint()) {
        spans.push(Span::styled(
            format!(
                "  (selecting {} across pages, complete by page {})",
                pursuit.target, page
            ),
            Style::default().fg(theme.pursuing),
        ));
    }

    if let Some(page) = app.requests.pending_page() {
        spans.push(Span::styled(
            format!("  {} Loading page {}...", spinner_char(app.tick), page),
            Style::default().fg(theme.spinner),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);

    let base = Paragraph::new(Line::from(Span::styled(
        format!("{} ", app.api_base),
        Style::default().fg(theme.dim),
    )))
    .alignment(Alignment::Right);
    if area.width > 90 {
        f.render_widget(base, area);
    }
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let Some(status) = &app.status else {
        return;
    };
    let style = match status.kind {
        StatusKind::Info => Style::default().fg(theme.active),
        StatusKind::Error => Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {}", status.text), style))),
        area,
    );
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let window = app.selection.window();
    let wide = area.width >= 110;

    let columns: &[(&str, Option<SortOrder>)] = if wide {
        &[
            ("", None),
            ("Title", Some(SortOrder::Title)),
            ("Place of Origin", Some(SortOrder::Place)),
            ("Artist", Some(SortOrder::Artist)),
            ("Inscriptions", None),
            ("Start Date", Some(SortOrder::StartDate)),
            ("End Date", Some(SortOrder::EndDate)),
        ]
    } else {
        &[
            ("", None),
            ("Title", Some(SortOrder::Title)),
            ("Artist", Some(SortOrder::Artist)),
            ("Start", Some(SortOrder::StartDate)),
            ("End", Some(SortOrder::EndDate)),
        ]
    };
    let arrow = if app.sort_reversed { " \u{2193}" } else { " \u{2191}" };
    let header = Row::new(columns.iter().map(|(name, order)| {
        let label = if *order == Some(app.sort_order) {
            format!("{name}{arrow}")
        } else {
            name.to_string()
        };
        Cell::from(label).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
    }))
    .height(1);

    let title_width = if wide {
        (area.width as usize).saturating_sub(90) / 2 + 20
    } else {
        (area.width as usize).saturating_sub(30) / 2
    };

    let rows: Vec<Row> = app
        .row_order
        .iter()
        .filter_map(|&i| window.records.get(i))
        .map(|art| {
            let checked = app.selection.is_selected(art.id);
            let checkbox = if checked { "[x]" } else { "[ ]" };
            let row_style = if checked {
                Style::default().fg(theme.selected)
            } else {
                Style::default().fg(theme.text)
            };
            let title = truncate(art.title_display(), title_width);
            let artist = truncate(art.artist_display_text(), title_width);
            let cells = if wide {
                vec![
                    Cell::from(checkbox),
                    Cell::from(title),
                    Cell::from(truncate(art.place_display(), 18)),
                    Cell::from(artist),
                    Cell::from(truncate(art.inscriptions_display(), 20)),
                    Cell::from(art.date_start_display()),
                    Cell::from(art.date_end_display()),
                ]
            } else {
                vec![
                    Cell::from(checkbox),
                    Cell::from(title),
                    Cell::from(artist),
                    Cell::from(art.date_start_display()),
                    Cell::from(art.date_end_display()),
                ]
            };
            Row::new(cells).style(row_style)
        })
        .collect();

    let widths = if wide {
        vec![
            Constraint::Length(3),  // checkbox
            Constraint::Min(20),    // Title
            Constraint::Length(18), // Place of Origin
            Constraint::Min(20),    // Artist
            Constraint::Length(20), // Inscriptions
            Constraint::Length(10), // Start Date
            Constraint::Length(10), // End Date
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(6),
        ]
    };

    let mut block_title = if window.page == 0 {
        " Artworks ".to_string()
    } else {
        format!(" Page {} of {} ", window.page, window.total_pages())
    };
    if app.sort_order != SortOrder::Page || app.sort_reversed {
        block_title.push_str(&format!("\u{00B7} Sort: {}{} (o) ", app.sort_order.label(), arrow));
    }

    if rows.is_empty() {
        let message = if app.requests.in_flight() {
            format!("  {} Loading artworks...", spinner_char(app.tick))
        } else {
            "  No artworks found.".to_string()
        };
        let empty = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(theme.dim),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(block_title),
        );
        f.render_widget(empty, area);
        return;
    }

    let table = Table::new(rows, &widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(block_title),
        )
        .row_highlight_style(theme.highlight_style());

    // The state persists on App: ratatui scrolls it to keep the cursor
    // visible, and clicks read the resulting offset.
    app.table_state.select(Some(app.row_cursor));
    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_paginator(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let window = app.selection.window();
    let (first, last) = display_range(window.page, PAGE_SIZE, window.total);
    let total_pages = window.total_pages();

    let mut spans = vec![
        Span::styled(" Showing ", Style::default().fg(theme.dim)),
        Span::styled(first.to_string(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        Span::styled(" to ", Style::default().fg(theme.dim)),
        Span::styled(last.to_string(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        Span::styled(" of ", Style::default().fg(theme.dim)),
        Span::styled(
            window.total.to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" entries   ", Style::default().fg(theme.dim)),
    ];

    let edge_style = |enabled: bool| {
        if enabled {
            Style::default().fg(theme.active)
        } else {
            Style::default().fg(theme.dim)
        }
    };
    spans.push(Span::styled("\u{2039} ", edge_style(window.page > 1)));
    for page in page_window(window.page, total_pages, MAX_PAGES_SHOWN) {
        if page == window.page {
            spans.push(Span::styled(format!("[{page}]"), theme.header_style()));
        } else {
            spans.push(Span::styled(format!(" {page} "), Style::default().fg(theme.text)));
        }
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("\u{203A}", edge_style(window.page < total_pages)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(f: &mut Frame, area: Rect, theme: &Theme) {
    let footer = Line::from(Span::styled(
        " Space:toggle  a:page  s:select N  c:clear  h/l:page  o/O:sort  r:reload  ?:help  q:quit",
        theme.footer_style(),
    ));
    f.render_widget(Paragraph::new(footer), area);
}
