//! Composable UI component renderers.
//!
//! Each component draws one part of the interface at an explicit row and returns
//! the next free row, so layouts are plain sequences of calls.
//!
//! # Components
//!
//! - [`header`]: Title bar with the theme label
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search input box with placeholder and cursor
//! - [`history`]: Recent-search dropdown
//! - [`grid`]: Three-column airport cards
//! - [`detail`]: Airport facts next to the map
//! - [`map`]: Equirectangular world map with a marker
//! - [`pagination`]: Previous / page / next controls
//! - [`empty`]: Empty state and loading messages
//!
//! # Layouts
//!
//! - [`render_results_screen`]: Header + search bar + history + body + pagination + footer
//! - [`render_detail_screen`]: Header + body + footer

pub mod detail;
pub mod empty;
pub mod footer;
pub mod grid;
pub mod header;
pub mod history;
pub mod map;
pub mod pagination;
pub mod search;

use crate::ui::helpers::render_border;
use crate::ui::theme::Palette;
use crate::ui::viewmodel::{Body, UIViewModel};

/// Rows reserved below the body: pagination, border, footer.
const BOTTOM_CHROME: usize = 3;

/// Renders the header and its border, returning the first body row.
fn render_top(vm: &UIViewModel, palette: &Palette, cols: usize) -> usize {
    let row = header::render_header(1, &vm.header, palette, cols);
    render_border(row, &palette.colors.border, cols)
}

/// Renders the border and footer on the last two rows.
fn render_bottom(vm: &UIViewModel, palette: &Palette, cols: usize, rows: usize) {
    let footer_row = rows.max(2);
    render_border(footer_row - 1, &palette.colors.border, cols);
    footer::render_footer(footer_row, &vm.footer, palette, cols);
}

fn render_body(row: usize, last_row: usize, body: &Body, palette: &Palette, cols: usize) -> usize {
    match body {
        Body::Loading => empty::render_loading(row, palette, cols),
        Body::Empty(state) => empty::render_empty_state(row, state, palette, cols),
        Body::Grid(cards) => grid::render_grid(row, last_row, cards, palette, cols),
        Body::Detail(view) => detail::render_detail(row, last_row, view, palette, cols),
    }
}

/// Renders the results screen.
///
/// Layout structure:
/// ```text
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [History panel, while searching]
/// [Body: cards, empty state or loading]
/// [Pagination]
/// [Border]
/// [Footer]
/// ```
pub fn render_results_screen(vm: &UIViewModel, palette: &Palette, cols: usize, rows: usize) {
    let last_body_row = rows.saturating_sub(BOTTOM_CHROME) + 1;

    let mut row = render_top(vm, palette, cols);
    if let Some(search) = &vm.search_bar {
        row = search::render_search_bar(row, search, palette, cols);
    }
    if let Some(panel) = &vm.history_panel {
        row = history::render_history_panel(row, last_body_row, panel, palette, cols);
    }
    render_body(row + 1, last_body_row, &vm.body, palette, cols);

    if let Some(info) = &vm.pagination {
        pagination::render_pagination(last_body_row, info, palette, cols);
    }
    render_bottom(vm, palette, cols, rows);
}

/// Renders the detail screen.
///
/// Layout structure:
/// ```text
/// [Header]
/// [Border]
/// [Title]
/// [Facts | Map]
/// [Border]
/// [Footer]
/// ```
pub fn render_detail_screen(vm: &UIViewModel, palette: &Palette, cols: usize, rows: usize) {
    let last_body_row = rows.saturating_sub(2);

    let row = render_top(vm, palette, cols);
    render_body(row, last_body_row, &vm.body, palette, cols);
    render_bottom(vm, palette, cols, rows);
}
