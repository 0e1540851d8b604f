//! Colour palettes and ANSI escape sequence generation.
//!
//! Each [`ThemePreference`] maps to one [`Palette`]. The built-in palettes live in
//! `themes/light.toml` and `themes/dark.toml` and are compiled into the plugin; a
//! custom TOML file can replace either one through configuration.
//!
//! # TOML Format
//!
//! ```toml
//! name = "dark"
//!
//! [colors]
//! header_fg = "#e2e8f0"
//! header_bg = "#1e293b"          # optional
//! text_normal = "#e2e8f0"
//! text_dim = "#94a3b8"
//! border = "#334155"
//! search_bar_border = "#38bdf8"
//! placeholder_fg = "#64748b"
//! card_border = "#475569"
//! selection_fg = "#0f172a"
//! selection_bg = "#38bdf8"
//! accent_fg = "#fbbf24"
//! empty_state_fg = "#7dd3fc"
//! disabled_fg = "#475569"
//! map_fg = "#334155"
//! marker_fg = "#f87171"
//! ```
//!
//! # Example
//!
//! ```
//! use skyconnect::app::ThemePreference;
//! use skyconnect::ui::theme::Palette;
//!
//! let palette = Palette::builtin(ThemePreference::Light)?;
//! assert_eq!(palette.name, "light");
//! print!("{}Bold Text{}", Palette::bold(), Palette::reset());
//! # Ok::<(), skyconnect::SkyConnectError>(())
//! ```

use crate::app::theme_store::ThemePreference;
use crate::domain::error::{Result, SkyConnectError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const LIGHT_TOML: &str = include_str!("../../themes/light.toml");
const DARK_TOML: &str = include_str!("../../themes/dark.toml");

/// A named set of colours used to render one theme.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Palette {
    /// Human-readable palette name.
    pub name: String,
    /// Colour for every UI element.
    pub colors: PaletteColors,
}

/// Colour definitions for all UI elements, as hex strings (`"#38bdf8"`).
///
/// An empty string means "terminal default" and produces no escape sequence.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PaletteColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text: footer, card subtitles, field labels.
    pub text_dim: String,

    /// Horizontal separators.
    pub border: String,

    pub search_bar_border: String,
    /// "Search airports..." hint shown while the query is empty.
    pub placeholder_fg: String,

    pub card_border: String,
    pub selection_fg: String,
    pub selection_bg: String,

    /// IATA codes and the active page number.
    pub accent_fg: String,

    pub empty_state_fg: String,

    /// Pagination directions that cannot be taken.
    pub disabled_fg: String,

    pub map_fg: String,
    pub marker_fg: String,
}

impl Palette {
    /// Parses the built-in palette for `preference`.
    ///
    /// # Errors
    ///
    /// Returns [`SkyConnectError::Theme`] if the bundled TOML does not parse.
    pub fn builtin(preference: ThemePreference) -> Result<Self> {
        let source = match preference {
            ThemePreference::Light => LIGHT_TOML,
            ThemePreference::Dark => DARK_TOML,
        };
        Self::from_toml(source)
    }

    /// Parses a palette from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SkyConnectError::Theme`] on invalid syntax or missing fields.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| SkyConnectError::Theme(format!("invalid palette: {e}")))
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            SkyConnectError::Theme(format!(
                "failed to read palette file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml(&contents)
    }

    /// A colourless palette that leaves every element at the terminal default.
    #[must_use]
    pub fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            colors: PaletteColors::default(),
        }
    }

    /// Converts a hex colour to an RGB tuple, or `None` if it is not `#rrggbb`.
    fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some((r, g, b))
    }

    /// ANSI 24-bit foreground sequence for `hex`; empty for an invalid colour.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |(r, g, b)| format!("\u{001b}[38;2;{r};{g};{b}m"))
    }

    /// ANSI 24-bit background sequence for `hex`; empty for an invalid colour.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |(r, g, b)| format!("\u{001b}[48;2;{r};{g};{b}m"))
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

/// The light and dark palettes, selected by the current preference.
#[derive(Debug, Clone)]
pub struct Palettes {
    light: Palette,
    dark: Palette,
}

impl Palettes {
    /// Builds both palettes, preferring the custom files when given.
    ///
    /// A custom file that fails to load falls back to the built-in palette. A
    /// built-in palette that fails to parse falls back to [`Palette::plain`].
    #[must_use]
    pub fn load(light_file: Option<&str>, dark_file: Option<&str>) -> Self {
        Self {
            light: Self::load_one(ThemePreference::Light, light_file),
            dark: Self::load_one(ThemePreference::Dark, dark_file),
        }
    }

    fn load_one(preference: ThemePreference, custom: Option<&str>) -> Palette {
        if let Some(path) = custom {
            match Palette::from_file(path) {
                Ok(palette) => return palette,
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "custom palette unusable, using built-in");
                }
            }
        }

        Palette::builtin(preference).unwrap_or_else(|e| {
            tracing::warn!(theme = %preference, error = %e, "built-in palette unusable");
            Palette::plain(preference.as_str())
        })
    }

    #[must_use]
    pub const fn for_preference(&self, preference: ThemePreference) -> &Palette {
        match preference {
            ThemePreference::Light => &self.light,
            ThemePreference::Dark => &self.dark,
        }
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Self::load(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_palettes_parse() {
        assert_eq!(Palette::builtin(ThemePreference::Light).unwrap().name, "light");
        assert_eq!(Palette::builtin(ThemePreference::Dark).unwrap().name, "dark");
    }

    #[test]
    fn test_palettes_follow_preference() {
        let palettes = Palettes::default();
        assert_eq!(palettes.for_preference(ThemePreference::Dark).name, "dark");
        assert_eq!(palettes.for_preference(ThemePreference::Light).name, "light");
    }

    #[test]
    fn test_custom_file_replaces_builtin() {
        let file = NamedTempFile::new().unwrap();
        let custom = DARK_TOML.replace("name = \"dark\"", "name = \"midnight\"");
        std::fs::write(file.path(), custom).unwrap();

        let path = file.path().to_string_lossy().to_string();
        let palettes = Palettes::load(None, Some(&path));

        assert_eq!(palettes.for_preference(ThemePreference::Dark).name, "midnight");
    }

    #[test]
    fn test_broken_custom_file_falls_back() {
        let palettes = Palettes::load(Some("/nonexistent/palette.toml"), None);
        assert_eq!(palettes.for_preference(ThemePreference::Light).name, "light");
    }

    #[test]
    fn test_escape_sequences() {
        assert_eq!(Palette::fg("#0284c7"), "\u{1b}[38;2;2;132;199m");
        assert_eq!(Palette::bg("ffffff"), "\u{1b}[48;2;255;255;255m");
        assert_eq!(Palette::fg(""), "");
        assert_eq!(Palette::fg("#zzzzzz"), "");
    }
}
