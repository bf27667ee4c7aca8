//! # Rendering Module
//!
//! Styled terminal output for the diary, through `outstanding` templates and
//! the [`DIARY_THEME`] styles.
//!
//! ## Design Philosophy
//!
//! Layout calculations (wrapping, truncation, padding to the page column) stay
//! in Rust because they need Unicode-aware widths. Templates handle
//! presentation:
//! - Style selection from semantic names (placeholder, disabled, note colour)
//! - Which sections appear (placing prompt, sticky note list)
//! - Frame characters around the spread

use super::styles::{names, note_style, DIARY_THEME};
use super::templates;
use diary::animation::SheetTransform;
use diary::api::{BookView, CmdMessage, FlipView, MessageLevel, PageView};
use diary::config::{DiaryConfig, CONFIG_KEYS};
use diary::model::StickyNote;
use log::error;
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Text columns inside one page.
pub const PAGE_WIDTH: usize = 34;
/// Text lines shown per page.
pub const PAGE_LINES: usize = 10;

pub const PLACEHOLDER: &str = "Write your day...";
pub const PLACING_PROMPT: &str = "Click anywhere on the page to place the sticky";
pub const PREV_LABEL: &str = "‹ Prev";
pub const NEXT_LABEL: &str = "Next ›";
const STICKY_LABEL: &str = "Add Sticky";
const STICKY_PLACING_LABEL: &str = "Click on page…";
const NOTE_SWATCH: &str = "■";
const NOTE_PREVIEW_WIDTH: usize = 40;
const EMPTY_NOTE: &str = "(empty)";
const NO_NOTES: &str = "No sticky notes.";
const SHEET_FILL: &str = "▒";

/// Width of the whole book, both pages and the three borders.
const BOOK_WIDTH: usize = 2 * (PAGE_WIDTH + 2) + 3;

#[derive(Serialize)]
struct Row {
    left: String,
    left_style: &'static str,
    right: String,
    right_style: &'static str,
}

#[derive(Serialize)]
struct NoteLine {
    swatch: &'static str,
    style: String,
    id: String,
    position: String,
    text: String,
    text_style: &'static str,
}

#[derive(Serialize)]
struct BookData {
    title: &'static str,
    sticky_label: &'static str,
    sticky_style: &'static str,
    new_link: String,
    placing: bool,
    prompt: &'static str,
    rule: String,
    rows: Vec<Row>,
    left_number: String,
    right_number: String,
    prev_label: &'static str,
    prev_style: &'static str,
    nav_gap: String,
    next_label: &'static str,
    next_style: &'static str,
    notes: Vec<NoteLine>,
}

#[derive(Serialize)]
struct FlipData {
    heading: String,
    rule: String,
    rows: Vec<Row>,
}

#[derive(Serialize)]
struct FrameData {
    sheet: String,
    angle: String,
}

#[derive(Serialize)]
struct NotesData {
    notes: Vec<NoteLine>,
    empty_message: &'static str,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
}

/// Holds the compiled templates and the colour decision for one process.
pub struct Renderer {
    inner: outstanding::Renderer,
}

impl Renderer {
    /// Colour follows terminal detection unless `no_color` is set.
    pub fn new(no_color: bool) -> Self {
        let theme = DIARY_THEME.clone();
        let mut inner = if no_color {
            outstanding::Renderer::with_color(theme, false)
        } else {
            outstanding::Renderer::new(theme)
        };

        for (name, source) in templates::ALL {
            if let Err(e) = inner.add_template(name, source) {
                error!("event=template_error name={} error={}", name, e);
            }
        }
        Self { inner }
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, minijinja::Error> {
        let mut output = self.inner.render(name, data)?;
        if !output.is_empty() && !output.ends_with('\n') {
            output.push('\n');
        }
        Ok(output)
    }

    /// The toolbar, the visible spread, the navigation controls and the notes.
    pub fn book(&self, view: &BookView) -> String {
        let (sticky_label, sticky_style) = if view.placing {
            (STICKY_PLACING_LABEL, names::BUTTON_ACTIVE)
        } else {
            (STICKY_LABEL, names::BUTTON)
        };
        let nav_style = |enabled: bool| {
            if enabled && !view.flipping {
                names::BUTTON
            } else {
                names::DISABLED
            }
        };
        let nav_gap = BOOK_WIDTH.saturating_sub(PREV_LABEL.width() + NEXT_LABEL.width());

        let data = BookData {
            title: view.title,
            sticky_label,
            sticky_style,
            new_link: view.new_link.clone(),
            placing: view.placing,
            prompt: PLACING_PROMPT,
            rule: rule(),
            rows: spread_rows(&view.left, &view.right, names::PAGE_TEXT),
            left_number: centered(&view.left.number.to_string(), PAGE_WIDTH),
            right_number: centered(&view.right.number.to_string(), PAGE_WIDTH),
            prev_label: PREV_LABEL,
            prev_style: nav_style(view.can_back),
            nav_gap: " ".repeat(nav_gap),
            next_label: NEXT_LABEL,
            next_style: nav_style(view.can_forward),
            notes: note_lines(&view.notes),
        };

        self.render("book", &data)
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    /// The turning sheet: its front ("from") and back ("to") faces.
    pub fn flip(&self, flip: &FlipView) -> String {
        let data = FlipData {
            heading: format!(
                "Turning {}: page {} → page {}",
                flip.direction, flip.from.number, flip.to.number
            ),
            rule: rule(),
            rows: spread_rows(&flip.from, &flip.to, names::SHEET),
        };
        self.render("flip", &data)
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    /// One animation frame of the sheet at `progress` through the turn.
    pub fn frame(&self, transform: &SheetTransform, progress: f64) -> String {
        let angle = transform.rotation_at(progress);
        let data = FrameData {
            sheet: sheet_bar(angle, PAGE_WIDTH),
            angle: format!("{:>5.0}°", angle),
        };
        self.render("frame", &data)
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    pub fn notes(&self, notes: &[StickyNote]) -> String {
        let data = NotesData {
            notes: note_lines(notes),
            empty_message: NO_NOTES,
        };
        self.render("notes", &data)
            .unwrap_or_else(|_| format!("{}\n", NO_NOTES))
    }

    pub fn messages(&self, messages: &[CmdMessage]) -> String {
        if messages.is_empty() {
            return String::new();
        }

        let data = MessagesData {
            messages: messages
                .iter()
                .map(|msg| MessageData {
                    content: msg.content.clone(),
                    style: match msg.level {
                        MessageLevel::Info => names::INFO,
                        MessageLevel::Success => names::SUCCESS,
                        MessageLevel::Warning => names::WARNING,
                    },
                })
                .collect(),
        };

        self.render("messages", &data).unwrap_or_else(|_| {
            messages
                .iter()
                .map(|m| format!("{}\n", m.content))
                .collect()
        })
    }

    /// `key = value` for every key, or just the requested ones.
    pub fn config(&self, config: &DiaryConfig, only: Option<&str>) -> String {
        let entries = CONFIG_KEYS
            .into_iter()
            .filter(|key| only.map_or(true, |wanted| wanted == *key))
            .filter_map(|key| config.get(key).map(|value| ConfigEntry { key, value }))
            .collect();
        self.render("config", &ConfigData { entries })
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }
}

fn rule() -> String {
    "─".repeat(PAGE_WIDTH + 2)
}

fn spread_rows(left: &PageView, right: &PageView, text_style: &'static str) -> Vec<Row> {
    page_column(&left.text, text_style)
        .into_iter()
        .zip(page_column(&right.text, text_style))
        .map(|((left, left_style), (right, right_style))| Row {
            left,
            left_style,
            right,
            right_style,
        })
        .collect()
}

/// Exactly [`PAGE_LINES`] lines of [`PAGE_WIDTH`] columns each.
fn page_column(text: &str, text_style: &'static str) -> Vec<(String, &'static str)> {
    let mut lines: Vec<(String, &'static str)> = if text.trim().is_empty() {
        vec![(PLACEHOLDER.to_string(), names::PLACEHOLDER)]
    } else {
        wrap(text, PAGE_WIDTH)
            .into_iter()
            .map(|line| (line, text_style))
            .collect()
    };

    if lines.len() > PAGE_LINES {
        lines.truncate(PAGE_LINES);
        if let Some((last, _)) = lines.last_mut() {
            *last = with_ellipsis(last, PAGE_WIDTH);
        }
    }
    lines.resize(PAGE_LINES, (String::new(), text_style));

    lines
        .into_iter()
        .map(|(line, style)| (pad_to_width(&line, PAGE_WIDTH), style))
        .collect()
}

/// Word-wraps `text` to `width` columns, keeping explicit line breaks.
/// Words longer than a line are broken.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if line_width > 0 && line_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if line_width > 0 {
                line.push(' ');
                line_width += 1;
            }
            for c in word.chars() {
                let char_width = c.width().unwrap_or(0);
                if line_width + char_width > width {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(c);
                line_width += char_width;
            }
        }
        lines.push(line);
    }

    lines
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Marks `line` as cut short, keeping it within `width`.
fn with_ellipsis(line: &str, width: usize) -> String {
    let kept = truncate_to_width(line, width.saturating_sub(1));
    let kept = kept.trim_end_matches('…');
    format!("{}…", kept)
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn centered(s: &str, width: usize) -> String {
    let total = width.saturating_sub(s.width());
    let before = total / 2;
    format!("{}{}{}", " ".repeat(before), s, " ".repeat(total - before))
}

fn note_lines(notes: &[StickyNote]) -> Vec<NoteLine> {
    notes
        .iter()
        .map(|note| {
            let preview = note.text.replace('\n', " ");
            let (text, text_style) = if preview.trim().is_empty() {
                (EMPTY_NOTE.to_string(), names::PLACEHOLDER)
            } else {
                (truncate_to_width(&preview, NOTE_PREVIEW_WIDTH), names::PAGE_TEXT)
            };
            NoteLine {
                swatch: NOTE_SWATCH,
                style: note_style(&note.color),
                id: note.short_id().to_string(),
                position: format!("({:.0}, {:.0}) {:+.1}°", note.x, note.y, note.rotation),
                text,
                text_style,
            }
        })
        .collect()
}

/// The sheet seen edge-on from above: the spine in the middle, the sheet's
/// projected width on whichever side it currently lies.
fn sheet_bar(angle_deg: f64, width: usize) -> String {
    let projected = angle_deg.to_radians().cos();
    let cells = ((projected.abs() * width as f64).round() as usize).min(width);
    let sheet = SHEET_FILL.repeat(cells);
    let blank = " ".repeat(width - cells);
    if projected >= 0.0 {
        format!("{}│{}{}", " ".repeat(width), sheet, blank)
    } else {
        format!("{}{}│{}", blank, sheet, " ".repeat(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diary::api::{DiaryApi, DiaryOptions};
    use diary::model::{Direction, Point};
    use diary::store::memory::InMemoryStore;

    fn api() -> DiaryApi<InMemoryStore> {
        DiaryApi::open(InMemoryStore::new(), DiaryOptions::default()).unwrap()
    }

    #[test]
    fn test_render_fresh_book() {
        let output = Renderer::new(true).book(&api().view());

        assert!(output.contains("My Diary"));
        assert!(output.contains("Add Sticky"));
        assert!(output.contains("https://vercel.com/"));
        assert!(output.contains(PLACEHOLDER));
        assert!(output.contains(PREV_LABEL));
        assert!(output.contains(NEXT_LABEL));
        assert!(!output.contains(PLACING_PROMPT));
        assert!(!output.contains("(!?)"));
    }

    #[test]
    fn test_render_page_text_and_numbers() {
        let mut api = api();
        api.write_page(1, "Dear diary").unwrap();
        api.write_page(2, "Second page").unwrap();

        let output = Renderer::new(true).book(&api.view());
        assert!(output.contains("Dear diary"));
        assert!(output.contains("Second page"));
        assert!(!output.contains(PLACEHOLDER));

        let number_row = output
            .lines()
            .find(|line| line.contains(" 1 ") && line.contains(" 2 "));
        assert!(number_row.is_some());
    }

    #[test]
    fn test_render_placing_prompt() {
        let mut api = api();
        api.toggle_placing();

        let output = Renderer::new(true).book(&api.view());
        assert!(output.contains(PLACING_PROMPT));
        assert!(output.contains(STICKY_PLACING_LABEL));
    }

    #[test]
    fn test_render_book_lines_align() {
        let output = Renderer::new(true).book(&api().view());
        let framed: Vec<&str> = output
            .lines()
            .filter(|line| line.starts_with('│') || line.starts_with('┌'))
            .collect();
        assert_eq!(framed.len(), PAGE_LINES + 2);
        for line in framed {
            assert_eq!(line.width(), BOOK_WIDTH, "misaligned: {:?}", line);
        }
    }

    #[test]
    fn test_render_notes() {
        let mut api = api();
        api.toggle_placing();
        let note = api.click(Point::new(300.0, 200.0)).unwrap().affected_notes[0].clone();
        api.edit_note(&note.id, "buy milk").unwrap();

        let renderer = Renderer::new(true);
        let output = renderer.notes(api.notes());
        assert!(output.contains(note.short_id()));
        assert!(output.contains("(220, 120)"));
        assert!(output.contains("buy milk"));

        assert!(renderer.book(&api.view()).contains("buy milk"));
        assert_eq!(renderer.notes(&[]).trim(), NO_NOTES);
    }

    #[test]
    fn test_render_flip_overlay() {
        let mut api = api();
        api.write_page(2, "leaving").unwrap();
        api.write_page(3, "arriving").unwrap();
        api.request_flip(Direction::Forward);

        let output = Renderer::new(true).flip(&api.view().flip.unwrap());
        assert!(output.contains("Turning forward: page 2 → page 3"));
        assert!(output.contains("leaving"));
        assert!(output.contains("arriving"));
    }

    #[test]
    fn test_every_template_style_is_in_the_theme() {
        let mut api = api();
        api.toggle_placing();
        api.click(Point::new(300.0, 200.0)).unwrap();
        api.toggle_placing();
        api.request_flip(Direction::Forward);
        let view = api.view();
        let flip = view.flip.clone().unwrap();

        let renderer = Renderer::new(true);
        let outputs = [
            renderer.book(&view),
            renderer.flip(&flip),
            renderer.frame(&flip.transform, 0.5),
            renderer.notes(api.notes()),
            renderer.notes(&[]),
            renderer.messages(&[
                CmdMessage::info("i"),
                CmdMessage::success("s"),
                CmdMessage::warning("w"),
            ]),
            renderer.config(&DiaryConfig::default(), None),
        ];
        for output in outputs {
            assert!(!output.contains("(!?)"), "unstyled: {}", output);
            assert!(!output.contains("Render error"), "{}", output);
        }
    }

    #[test]
    fn test_render_messages() {
        let renderer = Renderer::new(true);
        let output = renderer.messages(&[
            CmdMessage::success("Page 1 saved"),
            CmdMessage::warning("careful"),
        ]);
        assert_eq!(output, "Page 1 saved\ncareful\n");
        assert_eq!(renderer.messages(&[]), "");
    }

    #[test]
    fn test_render_config() {
        let renderer = Renderer::new(true);
        let config = DiaryConfig::default();

        let all = renderer.config(&config, None);
        assert_eq!(all.lines().count(), CONFIG_KEYS.len());
        assert!(all.contains("page-count = 8"));

        let one = renderer.config(&config, Some("flip-duration-ms"));
        assert_eq!(one, "flip-duration-ms = 900\n");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("a\nb", 10), vec!["a", "b"]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        for line in wrap("the quick brown fox jumps over the lazy dog", 10) {
            assert!(line.width() <= 10);
        }
    }

    #[test]
    fn test_long_page_is_cut_with_ellipsis() {
        let text = "line\n".repeat(PAGE_LINES + 5);
        let column = page_column(&text, names::PAGE_TEXT);
        assert_eq!(column.len(), PAGE_LINES);
        assert!(column[PAGE_LINES - 1].0.contains('…'));
        assert!(column.iter().all(|(line, _)| line.width() == PAGE_WIDTH));
    }

    #[test]
    fn test_sheet_bar_crosses_the_spine() {
        let start = sheet_bar(0.0, 10);
        let (left, right) = start.split_once('│').unwrap();
        assert_eq!(left.trim(), "");
        assert_eq!(right, SHEET_FILL.repeat(10));

        let end = sheet_bar(-180.0, 10);
        let (left, right) = end.split_once('│').unwrap();
        assert_eq!(left, SHEET_FILL.repeat(10));
        assert_eq!(right.trim(), "");

        let edge_on = sheet_bar(-90.0, 10);
        assert!(!edge_on.contains(SHEET_FILL));
    }
}
