//! Pagination bar renderer.

use crate::ui::helpers::{center_padding, display_width, position_cursor};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::PaginationInfo;

const PREVIOUS: &str = "◀ Previous";
const NEXT: &str = "Next ▶";

/// Renders `◀ Previous  Page N  Next ▶` centered on `row`.
///
/// Directions that cannot be taken are drawn in the disabled colour.
pub fn render_pagination(row: usize, info: &PaginationInfo, palette: &Palette, cols: usize) -> usize {
    let page = format!("  Page {}  ", info.page);
    let width = display_width(PREVIOUS) + display_width(&page) + display_width(NEXT);

    let direction_color = |enabled: bool| {
        if enabled {
            Palette::fg(&palette.colors.text_normal)
        } else {
            Palette::fg(&palette.colors.disabled_fg)
        }
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(center_padding(width, cols)));
    print!("{}{PREVIOUS}", direction_color(info.has_previous));
    print!("{}{}{page}{}", Palette::bold(), Palette::fg(&palette.colors.accent_fg), Palette::reset());
    print!("{}{NEXT}", direction_color(info.has_next));
    print!("{}", Palette::reset());
    row + 1
}
