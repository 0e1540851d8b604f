//! Header component renderer.
//!
//! Renders the title bar: the app title centered and the current theme label
//! pinned to the right edge.

use crate::ui::helpers::{center_padding, display_width, position_cursor};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at the specified row.
///
/// Returns the next available row.
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [right padding] ☾ dark
/// ```
///
/// The theme label is dropped on terminals too narrow to fit both.
pub fn render_header(row: usize, header: &HeaderInfo, palette: &Palette, cols: usize) -> usize {
    let title_len = display_width(&header.title);
    let label = format!("{} ", header.theme_label);
    let label_len = display_width(&label);
    let padding = center_padding(title_len, cols);

    let show_label = padding + title_len + 1 + label_len <= cols;

    position_cursor(row, 1);
    print!("{}", Palette::bold());
    print!("{}", Palette::fg(&palette.colors.header_fg));
    if let Some(bg) = &palette.colors.header_bg {
        print!("{}", Palette::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    if show_label {
        print!("{}", " ".repeat(cols - padding - title_len - label_len));
        print!("{label}");
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    }

    print!("{}", Palette::reset());
    row + 1
}
