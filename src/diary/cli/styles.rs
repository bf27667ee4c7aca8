//! Styles for the diary CLI.
//!
//! Templates only ever name a style by what the text *is* (a page number, a
//! disabled button, a placeholder). The mapping from those names to colours
//! lives here, in one `outstanding` theme.
//!
//! Sticky notes get one style per palette entry, `note-<name>`, painted with
//! the note's own background colour so the list matches the book.

use console::Style;
use diary::model::{NoteColor, PALETTE};
use once_cell::sync::Lazy;
use outstanding::{rgb_to_ansi256, Theme};

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const TITLE: &str = "title";
    pub const BUTTON: &str = "button";
    pub const BUTTON_ACTIVE: &str = "button-active";
    pub const DISABLED: &str = "disabled";
    pub const FAINT: &str = "faint";
    pub const MUTED: &str = "muted";
    pub const PROMPT: &str = "prompt";
    pub const PAGE_TEXT: &str = "page-text";
    pub const PLACEHOLDER: &str = "placeholder";
    pub const PAGE_NUMBER: &str = "page-number";
    pub const SHEET: &str = "sheet";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const NOTE_CUSTOM: &str = "note-custom";
}

pub static DIARY_THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(rgb_to_ansi256((115, 115, 115)));
    let faint = Style::new().color256(rgb_to_ansi256((173, 173, 173)));
    let highlight = rgb_to_ansi256((253, 224, 71));

    let theme = Theme::new()
        .add(names::TITLE, Style::new().bold())
        .add(names::BUTTON, Style::new())
        .add(
            names::BUTTON_ACTIVE,
            Style::new().black().on_color256(highlight).bold(),
        )
        .add(names::DISABLED, faint.clone().dim())
        .add(names::FAINT, faint)
        .add(names::MUTED, muted.clone())
        .add(names::PROMPT, Style::new().black().on_color256(highlight))
        .add(names::PAGE_TEXT, Style::new())
        .add(names::PLACEHOLDER, muted.clone().italic())
        .add(names::PAGE_NUMBER, muted)
        .add(
            names::SHEET,
            Style::new().color256(rgb_to_ansi256((61, 52, 40))).italic(),
        )
        .add(names::INFO, Style::new().dim())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::NOTE_CUSTOM, Style::new().bold());

    PALETTE.iter().fold(theme, |theme, color| {
        let style = match hex_to_rgb(color.bg) {
            Some(rgb) => Style::new().color256(rgb_to_ansi256(rgb)).bold(),
            None => Style::new().bold(),
        };
        theme.add(&format!("note-{}", color.name), style)
    })
});

/// Style name for a note's colour swatch.
pub fn note_style(color: &NoteColor) -> String {
    match color.palette_name() {
        Some(name) => format!("note-{}", name),
        None => names::NOTE_CUSTOM.to_string(),
    }
}

/// Parses `#RRGGBB`.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_palette_hex() {
        assert_eq!(hex_to_rgb("#FEF08A"), Some((0xFE, 0xF0, 0x8A)));
        assert_eq!(hex_to_rgb("#1f2937"), Some((0x1f, 0x29, 0x37)));
        assert_eq!(hex_to_rgb("FEF08A"), None);
        assert_eq!(hex_to_rgb("#FFF"), None);
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
    }

    #[test]
    fn test_every_palette_entry_has_a_style() {
        for color in PALETTE {
            let style = note_style(&color.into());
            assert!(DIARY_THEME.styles().has(&style), "missing {}", style);
        }
    }

    #[test]
    fn test_custom_colour_falls_back() {
        let color = NoteColor {
            bg: "#000000".into(),
            text: "#ffffff".into(),
        };
        assert_eq!(note_style(&color), names::NOTE_CUSTOM);
    }

    #[test]
    fn test_every_name_is_registered() {
        let all = [
            names::TITLE,
            names::BUTTON,
            names::BUTTON_ACTIVE,
            names::DISABLED,
            names::FAINT,
            names::MUTED,
            names::PROMPT,
            names::PAGE_TEXT,
            names::PLACEHOLDER,
            names::PAGE_NUMBER,
            names::SHEET,
            names::INFO,
            names::SUCCESS,
            names::WARNING,
            names::NOTE_CUSTOM,
        ];
        for name in all {
            assert_eq!(DIARY_THEME.styles().apply_plain(name, "x"), "x");
        }
        assert_eq!(DIARY_THEME.styles().apply_plain("nope", "x"), "(!?) x");
    }
}
