//! Search bar component renderer.
//!
//! Renders the search input box with a bordered frame. An empty query shows the
//! placeholder; a focused box draws a block cursor after the query.

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search input box at the specified row.
///
/// Returns the next available row (the box uses 3 lines).
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────────┐ [margin]
/// [margin] │ / Search airports... │ [margin]
/// [margin] └──────────────────────┘ [margin]
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, palette: &Palette, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Palette::fg(&palette.colors.search_bar_border);

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}┌{}┐", "─".repeat(inner_width));
    print!("{}", Palette::reset());

    // Keep the tail of long queries visible while typing.
    let cursor = if search.focused { "█" } else { "" };
    let room = inner_width.saturating_sub(3 + display_width(cursor));
    let query_len = display_width(&search.query);
    let visible: String = search.query.chars().skip(query_len.saturating_sub(room)).collect();

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}│ / ");
    let used = if search.query.is_empty() {
        let placeholder: String = SearchBarInfo::PLACEHOLDER.chars().take(room).collect();
        print!("{}{cursor}", Palette::fg(&palette.colors.text_normal));
        print!("{}{placeholder}", Palette::fg(&palette.colors.placeholder_fg));
        display_width(cursor) + display_width(&placeholder)
    } else {
        print!("{}{visible}{cursor}", Palette::fg(&palette.colors.text_normal));
        display_width(&visible) + display_width(cursor)
    };
    print!("{}", " ".repeat(inner_width.saturating_sub(3 + used)));
    print!("{border}│");
    print!("{}", Palette::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{border}└{}┘", "─".repeat(inner_width));
    print!("{}", Palette::reset());

    row + 3
}
