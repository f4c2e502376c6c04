use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::centered_rect;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let popup = centered_rect(64, 30, f.area());

    let lines = vec![
        Line::from(Span::styled(
            " Keyboard Shortcuts ",
            theme.header_style(),
        )),
        Line::from(""),
        section_header("Rows", theme),
        key_line("j / \u{2193}", "Move down", theme),
        key_line("k / \u{2191}", "Move up", theme),
        key_line("Space / Enter", "Toggle row checkbox", theme),
        key_line("a", "Toggle every row on this page", theme),
        key_line("click", "Toggle clicked row", theme),
        key_line("o", "Sort this page by the next column", theme),
        key_line("O", "Reverse the sort direction", theme),
        Line::from(""),
        section_header("Pages", theme),
        key_line("l / \u{2192} / PgDn", "Next page", theme),
        key_line("h / \u{2190} / PgUp", "Previous page", theme),
        key_line("g / Home", "First page", theme),
        key_line("G / End", "Last page", theme),
        key_line("r", "Reload current page", theme),
        Line::from(""),
        section_header("Selection", theme),
        key_line("s", "Select multiple rows (across pages)", theme),
        key_line("Tab", "Switch select / deselect in the panel", theme),
        key_line("c", "Clear the whole selection", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("?", "Toggle this help", theme),
        key_line("Esc", "Close panel / dismiss message", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Force quit", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<20}"), Style::default().fg(theme.text)),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}
