use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of blank pages a fresh diary starts with (four spreads).
pub const DEFAULT_PAGE_COUNT: usize = 8;

/// Sticky notes are square, this many pixels on a side.
pub const NOTE_SIZE: f64 = 160.0;

/// Minimum distance kept between a freshly placed note and the container edge.
pub const NOTE_MARGIN: f64 = 8.0;

/// Notes are tilted by at most this many degrees either way.
pub const MAX_TILT_DEG: f64 = 4.0;

/// A single diary page. `id` is the page's position at creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: usize,
    pub text: String,
}

impl Entry {
    pub fn blank(id: usize) -> Self {
        Self {
            id,
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub bg: &'static str,
    pub text: &'static str,
}

/// The fixed set of sticky note colours.
pub const PALETTE: [PaletteColor; 4] = [
    PaletteColor {
        name: "yellow",
        bg: "#FEF08A",
        text: "#1f2937",
    },
    PaletteColor {
        name: "mint",
        bg: "#A7F3D0",
        text: "#064e3b",
    },
    PaletteColor {
        name: "sky",
        bg: "#BFDBFE",
        text: "#1e3a8a",
    },
    PaletteColor {
        name: "pink",
        bg: "#FBCFE8",
        text: "#831843",
    },
];

/// Background and foreground colour of a note, stored as CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteColor {
    pub bg: String,
    pub text: String,
}

impl From<PaletteColor> for NoteColor {
    fn from(color: PaletteColor) -> Self {
        Self {
            bg: color.bg.to_string(),
            text: color.text.to_string(),
        }
    }
}

impl NoteColor {
    /// Name of the palette entry this colour came from, if any.
    pub fn palette_name(&self) -> Option<&'static str> {
        PALETTE
            .iter()
            .find(|p| p.bg.eq_ignore_ascii_case(&self.bg))
            .map(|p| p.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickyNote {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: NoteColor,
    #[serde(rename = "r")]
    pub rotation: f64,
}

impl StickyNote {
    /// First eight characters of the id, enough to address a note by hand.
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

/// Partial change merged into an existing note. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub text: Option<String>,
}

impl NotePatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            text: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn apply(&self, note: &mut StickyNote) {
        if let Some(x) = self.x {
            note.x = x;
        }
        if let Some(y) = self.y {
            note.y = y;
        }
        if let Some(text) = &self.text {
            note.text = text.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The book container's rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    pub fn at(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn contains(&self, client: Point) -> bool {
        client.x >= self.left
            && client.x <= self.left + self.width
            && client.y >= self.top
            && client.y <= self.top + self.height
    }

    /// Translates a client-space point into container-relative coordinates.
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}
