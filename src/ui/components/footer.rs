//! Footer component renderer.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Palette;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding hints centered on `row`, truncated to the width.
///
/// Returns the next available row.
pub fn render_footer(row: usize, footer: &FooterInfo, palette: &Palette, cols: usize) -> usize {
    print_centered(row, &footer.keybindings, &Palette::fg(&palette.colors.text_dim), cols);
    row + 1
}
