//! Colours for the board. Built-in One Dark values, optionally overridden by
//! a btop-style theme file (`theme[key]="#RRGGBB"` lines).

use crate::Palette;
use crate::catalog::PieceColor;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// One entry per [`PieceColor`], in declaration order.
    pub blocks: [Color; 8],
    pub bg: Color,
    /// Borders around the playfield and panels.
    pub div_line: Color,
    pub main_fg: Color,
    /// Panel titles and labels.
    pub title: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("cannot read theme file: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad colour {0:?}, expected #RRGGBB or #RGB")]
    InvalidHex(String),
}

const ONEDARK_BLOCKS: [(u8, u8, u8); 8] = [
    (0x56, 0xB6, 0xC2), // cyan
    (0x61, 0xAF, 0xEF), // blue
    (0xD1, 0x9A, 0x66), // orange
    (0xE5, 0xC0, 0x7B), // yellow
    (0xC6, 0x78, 0xDD), // purple
    (0xE0, 0x6C, 0x75), // red
    (0x98, 0xC3, 0x79), // green
    (0x5C, 0x63, 0x70), // gray
];

const HIGH_CONTRAST_BLOCKS: [(u8, u8, u8); 8] = [
    (0x00, 0xFF, 0xFF),
    (0x00, 0x88, 0xFF),
    (0xFF, 0x88, 0x00),
    (0xFF, 0xFF, 0x00),
    (0xFF, 0x00, 0xFF),
    (0xFF, 0x00, 0x00),
    (0x00, 0xFF, 0x00),
    (0xC0, 0xC0, 0xC0),
];

/// btop keys borrowed for each block colour, in [`PieceColor`] order.
const BLOCK_KEYS: [&str; 8] = [
    "hi_fg", "cpu_box", "cpu_mid", "title", "net_box", "cpu_end", "mem_box", "inactive_fg",
];

const fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            blocks: ONEDARK_BLOCKS.map(rgb),
            bg: rgb((0x31, 0x35, 0x3F)),
            div_line: rgb((0x3F, 0x44, 0x4F)),
            main_fg: rgb((0xAB, 0xB2, 0xBF)),
            title: rgb((0xE5, 0xC0, 0x7B)),
        }
    }
}

impl Theme {
    /// Theme for the CLI options. A missing file means built-in colours; an
    /// unreadable one is an error.
    pub fn load(path: Option<&Path>, palette: Palette) -> Result<Self, ThemeError> {
        let mut theme = match path.filter(|p| p.exists()) {
            Some(p) => Self::from_entries(&theme_entries(&std::fs::read_to_string(p)?)),
            None => Self::default(),
        };
        theme.apply_palette(palette);
        Ok(theme)
    }

    /// High contrast replaces the block colours only; panel colours stay.
    pub fn apply_palette(&mut self, palette: Palette) {
        if palette == Palette::HighContrast {
            self.blocks = HIGH_CONTRAST_BLOCKS.map(rgb);
        }
    }

    /// Overlay recognised keys on the defaults. Unparseable values are ignored.
    fn from_entries(entries: &HashMap<&str, &str>) -> Self {
        let lookup = |key: &str| entries.get(key).and_then(|v| parse_hex(v).ok());
        let mut theme = Self::default();
        for (slot, key) in theme.blocks.iter_mut().zip(BLOCK_KEYS) {
            *slot = lookup(key).unwrap_or(*slot);
        }
        for (slot, key) in [
            (&mut theme.bg, "meter_bg"),
            (&mut theme.div_line, "div_line"),
            (&mut theme.main_fg, "main_fg"),
            (&mut theme.title, "title"),
        ] {
            *slot = lookup(key).unwrap_or(*slot);
        }
        theme
    }

    pub fn block_color(&self, color: PieceColor) -> Color {
        self.blocks[color.index()]
    }
}

/// `theme[key]=value` pairs, quotes stripped. Comments, blank values and
/// other lines are skipped.
fn theme_entries(text: &str) -> HashMap<&str, &str> {
    text.lines()
        .filter_map(|line| {
            let (key, value) = line.trim().strip_prefix("theme[")?.split_once(']')?;
            let value = value.trim_start().strip_prefix('=')?.trim();
            let value = value.trim_matches(|c| c == '"' || c == '\'');
            (!value.is_empty()).then_some((key.trim(), value))
        })
        .collect()
}

/// `#RRGGBB` or `#RGB` (leading `#` optional).
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let digits = s.trim().trim_start_matches('#');
    let bad = || ThemeError::InvalidHex(s.to_string());
    if !digits.is_ascii() {
        return Err(bad());
    }
    let byte = |d: &str| u8::from_str_radix(d, 16).map_err(|_| bad());
    match digits.len() {
        6 => Ok(Color::Rgb(byte(&digits[0..2])?, byte(&digits[2..4])?, byte(&digits[4..6])?)),
        3 => Ok(Color::Rgb(
            byte(&digits[0..1])? * 0x11,
            byte(&digits[1..2])? * 0x11,
            byte(&digits[2..3])? * 0x11,
        )),
        _ => Err(bad()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_long_and_short() {
        assert_eq!(parse_hex("#98C379").unwrap(), Color::Rgb(0x98, 0xC3, 0x79));
        assert_eq!(parse_hex("fff").unwrap(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(matches!(parse_hex("#12345"), Err(ThemeError::InvalidHex(_))));
        assert!(parse_hex("#GGHHII").is_err());
        assert!(parse_hex("#ééé").is_err());
    }

    #[test]
    fn entries_accept_both_quote_styles() {
        let text = "# comment\ntheme[meter_bg]=\"#31353F\"\ntheme[ title ] = '#ABC'\ntheme[empty]=\"\"\nnot a theme line";
        let entries = theme_entries(text);
        assert_eq!(entries.get("meter_bg"), Some(&"#31353F"));
        assert_eq!(entries.get("title"), Some(&"#ABC"));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn file_keys_override_defaults() {
        let entries = theme_entries("theme[cpu_end]='#FF0000'\ntheme[main_fg]=\"#010203\"\ntheme[div_line]=\"nope\"");
        let theme = Theme::from_entries(&entries);
        assert_eq!(theme.block_color(PieceColor::Red), Color::Rgb(255, 0, 0));
        assert_eq!(theme.main_fg, Color::Rgb(1, 2, 3));
        assert_eq!(theme.div_line, Theme::default().div_line);
        assert_eq!(
            theme.block_color(PieceColor::Cyan),
            Theme::default().block_color(PieceColor::Cyan)
        );
    }

    #[test]
    fn missing_file_uses_built_in_colours() {
        let theme = Theme::load(Some(Path::new("/nonexistent/blockfall.theme")), Palette::Normal)
            .unwrap();
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn high_contrast_changes_blocks_only() {
        let theme = Theme::load(None, Palette::HighContrast).unwrap();
        assert_eq!(theme.block_color(PieceColor::Yellow), Color::Rgb(255, 255, 0));
        assert_eq!(theme.bg, Theme::default().bg);
    }
}
