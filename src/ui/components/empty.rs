//! Empty state and loading renderers.
//!
//! Both are drawn centered a few rows into the body area.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Palette;
use crate::ui::viewmodel::EmptyState;

/// Rows between the top of the body and the message.
const TOP_OFFSET: usize = 2;

/// Renders the empty state message and its subtitle.
///
/// Returns the row after the subtitle.
///
/// # Layout
///
/// ```text
/// [2 blank lines]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
pub fn render_empty_state(row: usize, empty: &EmptyState, palette: &Palette, cols: usize) -> usize {
    let row = row + TOP_OFFSET;
    let message_style = format!("{}{}", Palette::bold(), Palette::fg(&palette.colors.empty_state_fg));
    print_centered(row, &empty.message, &message_style, cols);

    let subtitle_style = format!("{}{}", Palette::dim(), Palette::fg(&palette.colors.text_dim));
    print_centered(row + 1, &empty.subtitle, &subtitle_style, cols);
    row + 2
}

/// Renders the loading indicator.
pub fn render_loading(row: usize, palette: &Palette, cols: usize) -> usize {
    let row = row + TOP_OFFSET;
    print_centered(row, "Loading...", &Palette::fg(&palette.colors.text_dim), cols);
    row + 1
}
