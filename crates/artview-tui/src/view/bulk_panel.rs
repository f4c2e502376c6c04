use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use artview_core::SelectionController;

use crate::model::bulk::{BulkMode, BulkPanelState};
use crate::theme::Theme;
use crate::view::centered_rect;

/// Render the "Select Multiple Rows" overlay.
pub fn render(f: &mut Frame, panel: &BulkPanelState, selection: &SelectionController, theme: &Theme) {
    let popup = centered_rect(56, 11, f.area());

    let prompt = match panel.mode {
        BulkMode::Select => "Enter number of rows to select across all pages",
        BulkMode::Deselect => "Enter number of rows to deselect on this page",
    };

    let mode_span = |mode: BulkMode| {
        let style = if panel.mode == mode {
            theme.header_style()
        } else {
            Style::default().fg(theme.dim)
        };
        Span::styled(format!(" {} ", mode.label()), style)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {prompt}"), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            mode_span(BulkMode::Select),
            Span::raw(" "),
            mode_span(BulkMode::Deselect),
            Span::styled("   Tab to switch", Style::default().fg(theme.dim)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  > ", Style::default().fg(theme.active)),
            Span::styled(
                panel.input.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("\u{2588}", Style::default().fg(theme.active)),
        ]),
    ];

    match &panel.error {
        Some(error) => lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ))),
        None => lines.push(Line::from(Span::styled(
            format!("  {} rows currently selected", selection.selected_count()),
            Style::default().fg(theme.dim),
        ))),
    }
    lines.push(Line::from(Span::styled(
        "  Enter to apply, Esc to cancel",
        Style::default().fg(theme.dim),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.active))
            .title(" Select Multiple Rows "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
