use crate::error::{DiaryError, Result};
use crate::model::Entry;
use crate::store::{KeyValueStore, ENTRIES_KEY};
use log::{debug, info};

/// Ordered, fixed-length list of diary pages.
///
/// Pages pair up into spreads, so the length is always even and never zero.
/// Only the text of an entry ever changes; every change rewrites the whole
/// record in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRepository {
    entries: Vec<Entry>,
}

impl EntryRepository {
    /// Load entries from the store, or start with `page_count` blank pages.
    ///
    /// A stored record that does not parse, or that cannot form spreads, is
    /// returned as an error rather than repaired.
    pub fn load<S: KeyValueStore>(store: &S, page_count: usize) -> Result<Self> {
        match store.get(ENTRIES_KEY)? {
            Some(raw) => {
                let entries: Vec<Entry> =
                    serde_json::from_str(&raw).map_err(DiaryError::Serialization)?;
                if entries.is_empty() || entries.len() % 2 != 0 {
                    return Err(DiaryError::Malformed(format!(
                        "{} holds {} pages, expected a non-zero even count",
                        ENTRIES_KEY,
                        entries.len()
                    )));
                }
                info!("event=entries_load source=store pages={}", entries.len());
                Ok(Self { entries })
            }
            None => {
                info!("event=entries_load source=default pages={}", page_count);
                Ok(Self::blank(page_count))
            }
        }
    }

    /// `count` blank pages with ids `0..count`.
    pub fn blank(count: usize) -> Self {
        Self {
            entries: (0..count).map(Entry::blank).collect(),
        }
    }

    /// Replace the text of the entry with `id` and persist the collection.
    ///
    /// Returns `false` when no entry has that id; the collection is still
    /// written back unchanged. Nothing changes in memory if the write fails.
    pub fn update<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        id: usize,
        text: impl Into<String>,
    ) -> Result<bool> {
        let mut next = self.entries.clone();
        let found = match next.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.text = text.into();
                true
            }
            None => {
                debug!("event=entry_update status=ignored reason=unknown_id id={}", id);
                false
            }
        };
        write(store, &next)?;
        self.entries = next;
        Ok(found)
    }

    pub fn persist<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        write(store, &self.entries)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The entry at page position `index`.
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn write<S: KeyValueStore>(store: &mut S, entries: &[Entry]) -> Result<()> {
    let raw = serde_json::to_string(entries).map_err(DiaryError::Serialization)?;
    store.set(ENTRIES_KEY, &raw)
}
