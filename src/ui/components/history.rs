//! Recent-search dropdown renderer.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::HistoryPanel;

/// Indentation matching the inside of the search box.
const INDENT: usize = 7;

/// Renders the history panel below the search bar.
///
/// Draws a dim title line and one line per entry, stopping before `last_row`.
/// The highlighted entry uses the selection colours. Returns the next free row.
pub fn render_history_panel(
    row: usize,
    last_row: usize,
    panel: &HistoryPanel,
    palette: &Palette,
    cols: usize,
) -> usize {
    let width = cols.saturating_sub(INDENT * 2);
    if row >= last_row || width < 4 {
        return row;
    }

    position_cursor(row, 1);
    print!("{}", " ".repeat(INDENT));
    print!("{}{}", Palette::dim(), Palette::fg(&palette.colors.text_dim));
    print!("{}", truncate("Recent searches", width));
    print!("{}", Palette::reset());

    let mut current_row = row + 1;
    for entry in &panel.entries {
        if current_row >= last_row {
            break;
        }

        let text = truncate(&format!(" ↺ {}", entry.query), width);

        position_cursor(current_row, 1);
        print!("{}", " ".repeat(INDENT));
        if entry.is_selected {
            print!("{}", Palette::fg(&palette.colors.selection_fg));
            print!("{}", Palette::bg(&palette.colors.selection_bg));
        } else {
            print!("{}", Palette::fg(&palette.colors.text_normal));
        }
        print!("{text}");
        print!("{}", " ".repeat(width.saturating_sub(display_width(&text))));
        print!("{}", Palette::reset());

        current_row += 1;
    }

    current_row
}
