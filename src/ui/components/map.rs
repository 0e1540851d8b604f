//! Coarse world map with a location marker.
//!
//! The map is an equirectangular plot: longitude maps linearly to columns and
//! latitude to rows. It shows a dotted 30° graticule, the equator and the prime
//! meridian, and a marker at the airport position.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Palette;

const MARKER: char = '✈';
const GRATICULE_STEP: f64 = 30.0;

/// Projects decimal degrees onto a `width` × `height` cell grid.
///
/// Returns `(column, row)` with `(0, 0)` at 180°W 90°N, or `None` when the grid
/// is empty or the coordinates are out of range.
///
/// # Example
///
/// ```
/// use skyconnect::ui::components::map::project;
///
/// assert_eq!(project(0.0, 0.0, 61, 31), Some((30, 15)));
/// assert_eq!(project(95.0, 0.0, 61, 31), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn project(latitude: f64, longitude: f64, width: usize, height: usize) -> Option<(usize, usize)> {
    if width == 0 || height == 0 {
        return None;
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    let x = (longitude + 180.0) / 360.0 * (width - 1) as f64;
    let y = (90.0 - latitude) / 180.0 * (height - 1) as f64;
    Some((x.round() as usize, y.round() as usize))
}

/// Character cells of a map, with the marker cell remembered for colouring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapCanvas {
    pub cells: Vec<Vec<char>>,
    pub marker: Option<(usize, usize)>,
}

impl MapCanvas {
    /// Draws the graticule and, when `position` projects inside, the marker.
    #[must_use]
    pub fn plot(position: Option<(f64, f64)>, width: usize, height: usize) -> Self {
        let mut cells = vec![vec![' '; width]; height];

        let mut lat = -90.0;
        while lat <= 90.0 {
            let mut lon = -180.0;
            while lon <= 180.0 {
                if let Some((x, y)) = project(lat, lon, width, height) {
                    cells[y][x] = '·';
                }
                lon += GRATICULE_STEP;
            }
            lat += GRATICULE_STEP;
        }

        if let Some((meridian, equator)) = project(0.0, 0.0, width, height) {
            for cell in &mut cells[equator] {
                *cell = '─';
            }
            for line in &mut cells {
                line[meridian] = '│';
            }
            cells[equator][meridian] = '┼';
        }

        let marker = position.and_then(|(lat, lon)| project(lat, lon, width, height));
        if let Some((x, y)) = marker {
            cells[y][x] = MARKER;
        }

        Self { cells, marker }
    }
}

/// Renders a framed map at `row`/`col` with the given outer size.
pub fn render_map(
    row: usize,
    col: usize,
    width: usize,
    height: usize,
    position: Option<(f64, f64)>,
    palette: &Palette,
) {
    let inner_width = width.saturating_sub(2);
    let inner_height = height.saturating_sub(2);
    if inner_width < 3 || inner_height < 3 {
        return;
    }

    let canvas = MapCanvas::plot(position, inner_width, inner_height);
    let frame = Palette::fg(&palette.colors.card_border);
    let ink = Palette::fg(&palette.colors.map_fg);

    position_cursor(row, col);
    print!("{frame}┌{}┐", "─".repeat(inner_width));

    for (y, line) in canvas.cells.iter().enumerate() {
        position_cursor(row + 1 + y, col);
        print!("{frame}│{ink}");
        for (x, cell) in line.iter().enumerate() {
            if canvas.marker == Some((x, y)) {
                print!("{}{}{cell}{}{ink}", Palette::bold(), Palette::fg(&palette.colors.marker_fg), Palette::reset());
            } else {
                print!("{cell}");
            }
        }
        print!("{frame}│");
    }

    position_cursor(row + height - 1, col);
    print!("{frame}└{}┘", "─".repeat(inner_width));
    print!("{}", Palette::reset());

    if position.is_some() && canvas.marker.is_none() {
        tracing::debug!(?position, "airport position outside map range");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_corners() {
        assert_eq!(project(90.0, -180.0, 37, 13), Some((0, 0)));
        assert_eq!(project(-90.0, 180.0, 37, 13), Some((36, 12)));
    }

    #[test]
    fn test_project_new_york_lands_in_north_west_quadrant() {
        let (x, y) = project(40.6413, -73.7781, 72, 19).unwrap();
        assert!(x < 36);
        assert!(y < 9);
    }

    #[test]
    fn test_project_rejects_out_of_range_and_empty_grid() {
        assert_eq!(project(0.0, 181.0, 10, 10), None);
        assert_eq!(project(f64::NAN, 0.0, 10, 10), None);
        assert_eq!(project(0.0, 0.0, 0, 10), None);
    }

    #[test]
    fn test_plot_places_marker() {
        let canvas = MapCanvas::plot(Some((-33.9461, 151.1772)), 37, 13);
        let (x, y) = canvas.marker.unwrap();
        assert_eq!(canvas.cells[y][x], MARKER);
        assert!(x > 18 && y > 6, "Sydney plots south-east of the origin");
    }

    #[test]
    fn test_plot_without_position_has_axes_only() {
        let canvas = MapCanvas::plot(None, 37, 13);
        assert_eq!(canvas.marker, None);
        assert_eq!(canvas.cells[6][18], '┼');
        assert!(canvas.cells.iter().flatten().all(|&c| c != MARKER));
    }
}
