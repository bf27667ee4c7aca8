//! # CLI Templates
//!
//! Terminal output is rendered through `outstanding` from templates kept as
//! stand-alone files, included here as string constants.
//!
//! Line breaks are explicit: block tags sit at the start or end of the line
//! they belong to, so no tag ever leaves a stray blank line behind. Loaded
//! templates drop their final newline, the renderer puts it back. Any width or
//! wrapping math is done in Rust before the data reaches a template; templates
//! only pick styles and decide what gets shown.

pub const BOOK_TEMPLATE: &str = include_str!("templates/book.tmp");
pub const FLIP_TEMPLATE: &str = include_str!("templates/flip.tmp");
pub const FRAME_TEMPLATE: &str = include_str!("templates/frame.tmp");
pub const NOTES_TEMPLATE: &str = include_str!("templates/notes.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");

/// Every template, by the name templates use to include each other.
pub const ALL: [(&str, &str); 6] = [
    ("book", BOOK_TEMPLATE),
    ("flip", FLIP_TEMPLATE),
    ("frame", FRAME_TEMPLATE),
    ("notes", NOTES_TEMPLATE),
    ("messages", MESSAGES_TEMPLATE),
    ("config", CONFIG_TEMPLATE),
];
