//! # Storage Layer
//!
//! The diary persists two independent records in a string-keyed store:
//!
//! ```text
//! diary-entries       -> [{"id": 0, "text": ""}, ...]
//! diary-sticky-notes  -> [{"id": "...", "x": 8, "y": 8, "text": "", "color": {...}, "r": 1.2}, ...]
//! ```
//!
//! Storage is abstracted behind [`KeyValueStore`] so the repositories never know
//! whether they talk to disk or memory. Each record is rewritten in full on every
//! mutation; there is no batching and the last write wins.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one `<key>.json` file per record inside a data directory.
//! - [`memory::InMemoryStore`]: for tests, with optional write-failure simulation.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Key holding the page entries.
pub const ENTRIES_KEY: &str = "diary-entries";

/// Key holding the sticky notes.
pub const NOTES_KEY: &str = "diary-sticky-notes";

/// Abstract interface over persistent key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`. Returns `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
