//! Airport detail renderer.
//!
//! Shows the airport name as a title, the labelled facts in a left column and,
//! when the pane is wide enough, the map in a right column.

use crate::ui::components::map::render_map;
use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::DetailView;

const LEFT: usize = 3;
const LABEL_WIDTH: usize = 14;

/// Narrowest pane that still gets a map column.
const MAP_MIN_COLS: usize = 70;
const MAP_MAX_WIDTH: usize = 62;

/// Renders the detail view between `row` and `last_row`.
pub fn render_detail(row: usize, last_row: usize, view: &DetailView, palette: &Palette, cols: usize) -> usize {
    position_cursor(row + 1, LEFT);
    print!("{}{}", Palette::bold(), Palette::fg(&palette.colors.header_fg));
    print!("✈ {}", truncate(&view.name, cols.saturating_sub(LEFT + 3)));
    print!("{}", Palette::reset());

    let body_row = row + 3;
    let with_map = cols >= MAP_MIN_COLS;
    let facts_width = if with_map { cols / 2 - LEFT } else { cols.saturating_sub(LEFT * 2) };
    let value_width = facts_width.saturating_sub(LABEL_WIDTH + 1);

    let mut current_row = body_row;
    for (label, value) in &view.fields {
        if current_row >= last_row {
            break;
        }
        position_cursor(current_row, LEFT);
        print!("{}", Palette::fg(&palette.colors.text_dim));
        print!("{label}{}", " ".repeat(LABEL_WIDTH.saturating_sub(display_width(label)) + 1));
        print!("{}", Palette::fg(&palette.colors.text_normal));
        print!("{}", truncate(value, value_width));
        print!("{}", Palette::reset());
        current_row += 1;
    }

    if with_map {
        let map_col = cols / 2 + 1;
        let width = (cols - map_col).min(MAP_MAX_WIDTH);
        let height = last_row.saturating_sub(body_row).min(width / 3 + 2);
        render_map(body_row, map_col, width, height, view.position, palette);
        current_row = current_row.max(body_row + height);
    }

    current_row
}
