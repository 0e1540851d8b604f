//! Shared rendering utilities and helpers.
//!
//! Cursor positioning plus width-aware text fitting used by every component.
//! Widths are counted in `char`s, which matches terminal cells for the text the
//! plugin draws (airport names, codes, box-drawing glyphs).

use crate::ui::theme::Palette;

/// Positions the cursor at a specific row and column.
///
/// Coordinates are 1-indexed (row 1 = first row, col 1 = first column).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of terminal cells `text` occupies.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` cells, ending with `…` when shortened.
///
/// # Example
///
/// ```
/// use skyconnect::ui::helpers::truncate;
///
/// assert_eq!(truncate("Heathrow", 10), "Heathrow");
/// assert_eq!(truncate("John F Kennedy International", 10), "John F Ke…");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Left padding that centers `text_width` cells inside `width` cells.
#[must_use]
pub const fn center_padding(text_width: usize, width: usize) -> usize {
    width.saturating_sub(text_width) / 2
}

/// Prints `text` centered on `row`, filling the line to `cols`.
pub fn print_centered(row: usize, text: &str, style: &str, cols: usize) {
    let text = truncate(text, cols);
    let width = display_width(&text);
    let padding = center_padding(width, cols);

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + width)));
    print!("{}", Palette::reset());
}

/// Renders a horizontal border line at the specified row.
///
/// Returns the next available row.
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Palette::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Palette::reset());
    row + 1
}
