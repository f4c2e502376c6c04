use std::io::Write;

use artview_core::pagination::display_range;
use artview_core::{Artwork, ArtworkId, PAGE_SIZE, PageWindow};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

const TITLE_WIDTH: usize = 40;
const ARTIST_WIDTH: usize = 32;

fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

fn print_row(
    w: &mut dyn Write,
    checkbox: &str,
    art: &Artwork,
    selected: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    let line = format!(
        "{} {:>8}  {:<tw$}  {:<aw$}  {:>6}  {:>6}",
        checkbox,
        art.id.0,
        clip(art.title_display(), TITLE_WIDTH),
        clip(art.artist_display_text(), ARTIST_WIDTH),
        art.date_start_display(),
        art.date_end_display(),
        tw = TITLE_WIDTH,
        aw = ARTIST_WIDTH,
    );
    if color.enabled() && selected {
        writeln!(w, "{}", line.green())
    } else {
        writeln!(w, "{line}")
    }
}

/// Print a page as a table, marking rows for which `is_selected` holds.
pub fn print_page(
    w: &mut dyn Write,
    window: &PageWindow,
    is_selected: impl Fn(ArtworkId) -> bool,
    color: ColorMode,
) -> std::io::Result<()> {
    let header = format!(
        "    {:>8}  {:<tw$}  {:<aw$}  {:>6}  {:>6}",
        "ID",
        "Title",
        "Artist",
        "Start",
        "End",
        tw = TITLE_WIDTH,
        aw = ARTIST_WIDTH,
    );
    if color.enabled() {
        writeln!(w, "{}", header.bold())?;
    } else {
        writeln!(w, "{header}")?;
    }

    if window.is_empty() {
        writeln!(w, "No artworks found.")?;
    }
    for art in &window.records {
        let selected = is_selected(art.id);
        let checkbox = if selected { "[x]" } else { "[ ]" };
        print_row(w, checkbox, art, selected, color)?;
    }

    writeln!(w)?;
    print_showing(w, window, color)
}

/// "Showing F to L of T entries", plus the page position.
pub fn print_showing(w: &mut dyn Write, window: &PageWindow, color: ColorMode) -> std::io::Result<()> {
    let (first, last) = display_range(window.page, PAGE_SIZE, window.total);
    let line = format!("Showing {} to {} of {} entries", first, last, window.total);
    let position = format!("(page {} of {})", window.page, window.total_pages());
    if color.enabled() {
        writeln!(w, "{} {}", line, position.dimmed())
    } else {
        writeln!(w, "{line} {position}")
    }
}

/// Ids in the order they were selected, one per line.
pub fn print_selected_ids(w: &mut dyn Write, ids: &[ArtworkId]) -> std::io::Result<()> {
    for id in ids {
        writeln!(w, "{id}")?;
    }
    Ok(())
}

/// Outcome of a bulk selection walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectSummary {
    pub requested: usize,
    pub selected: usize,
    pub total: u64,
    pub start_page: u32,
    pub last_page: u32,
    pub pages_loaded: usize,
}

pub fn print_select_summary(
    w: &mut dyn Write,
    summary: &SelectSummary,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", "=".repeat(60).bold())?;
        writeln!(w, "{}", "SELECTION SUMMARY".bold())?;
        writeln!(w, "{}", "=".repeat(60).bold())?;
    } else {
        writeln!(w, "{}", "=".repeat(60))?;
        writeln!(w, "SELECTION SUMMARY")?;
        writeln!(w, "{}", "=".repeat(60))?;
    }
    writeln!(w)?;
    writeln!(w, "  Requested:      {}", summary.requested)?;
    if color.enabled() {
        writeln!(w, "  Selected:       {}", summary.selected.green())?;
    } else {
        writeln!(w, "  Selected:       {}", summary.selected)?;
    }
    writeln!(w, "  Collection:     {} artworks", summary.total)?;
    writeln!(
        w,
        "  Pages:          {} to {} ({} loaded)",
        summary.start_page, summary.last_page, summary.pages_loaded
    )?;

    if summary.selected < summary.requested {
        let note = format!(
            "Only {} artworks were available from page {} on",
            summary.selected, summary.start_page
        );
        if color.enabled() {
            writeln!(w, "  {}", note.yellow())?;
        } else {
            writeln!(w, "  {note}")?;
        }
    }
    Ok(())
}
