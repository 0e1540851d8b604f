//! Results grid renderer.
//!
//! Cards are laid out row-major, three per row, each four lines tall:
//!
//! ```text
//! ┌────────────────────┐ ┌────────────────────┐ ┌────────────────────┐
//! │ Heathrow           │ │ Gatwick            │ │ Stansted           │
//! │ LON, United K… LHR │ │ LON, United K… LGW │ │ LON, United K… STN │
//! └────────────────────┘ └────────────────────┘ └────────────────────┘
//! ```
//!
//! The selected card is drawn with a double border in the selection colour.

use crate::app::state::GRID_COLUMNS;
use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Palette;
use crate::ui::viewmodel::CardItem;

/// Lines per card, borders included.
pub const CARD_HEIGHT: usize = 4;

const MARGIN: usize = 2;
const GAP: usize = 1;

/// Horizontal placement of grid columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Outer width of one card.
    pub card_width: usize,
    /// 1-indexed column of the first card.
    pub left: usize,
}

impl GridGeometry {
    /// Splits `cols` into three equal cards, or `None` when too narrow to draw.
    #[must_use]
    pub const fn for_width(cols: usize) -> Option<Self> {
        let usable = cols.saturating_sub(MARGIN * 2 + GAP * (GRID_COLUMNS - 1));
        let card_width = usable / GRID_COLUMNS;
        if card_width < 8 {
            return None;
        }
        Some(Self {
            card_width,
            left: MARGIN + 1,
        })
    }

    /// 1-indexed start column of grid column `column`.
    #[must_use]
    pub const fn column_start(&self, column: usize) -> usize {
        self.left + column * (self.card_width + GAP)
    }
}

/// Renders the cards starting at `row`, stopping before `last_row`.
///
/// Returns the next free row.
pub fn render_grid(row: usize, last_row: usize, cards: &[CardItem], palette: &Palette, cols: usize) -> usize {
    let Some(geometry) = GridGeometry::for_width(cols) else {
        return row;
    };

    let mut current_row = row;
    for line in cards.chunks(GRID_COLUMNS) {
        if current_row + CARD_HEIGHT > last_row {
            tracing::trace!(last_row, "grid truncated to fit pane height");
            break;
        }
        for (column, card) in line.iter().enumerate() {
            render_card(current_row, geometry.column_start(column), geometry.card_width, card, palette);
        }
        current_row += CARD_HEIGHT;
    }
    current_row
}

fn render_card(row: usize, col: usize, width: usize, card: &CardItem, palette: &Palette) {
    let inner = width.saturating_sub(2);
    let text_width = inner.saturating_sub(2);
    let (top, side, bottom, border_color) = if card.is_selected {
        (('╔', '═', '╗'), '║', ('╚', '═', '╝'), &palette.colors.selection_bg)
    } else {
        (('┌', '─', '┐'), '│', ('└', '─', '┘'), &palette.colors.card_border)
    };
    let border = Palette::fg(border_color);

    position_cursor(row, col);
    print!("{border}{}{}{}", top.0, top.1.to_string().repeat(inner), top.2);

    let name = truncate(&card.name, text_width);
    position_cursor(row + 1, col);
    print!("{border}{side} ");
    print!("{}{}", Palette::bold(), Palette::fg(&palette.colors.text_normal));
    print!("{name}{}", " ".repeat(text_width.saturating_sub(display_width(&name))));
    print!("{}{border} {side}", Palette::reset());

    let code_width = display_width(&card.code);
    let location = truncate(&card.location, text_width.saturating_sub(code_width + 1));
    let gap = text_width.saturating_sub(display_width(&location) + code_width);
    position_cursor(row + 2, col);
    print!("{border}{side} ");
    print!("{}{location}", Palette::fg(&palette.colors.text_dim));
    print!("{}", " ".repeat(gap));
    print!("{}{}{}", Palette::fg(&palette.colors.accent_fg), card.code, Palette::reset());
    print!("{border} {side}");

    position_cursor(row + 3, col);
    print!("{border}{}{}{}", bottom.0, bottom.1.to_string().repeat(inner), bottom.2);
    print!("{}", Palette::reset());
}
