use crate::error::{DiaryError, Result};
use crate::model::{
    Bounds, NotePatch, Point, StickyNote, MAX_TILT_DEG, NOTE_MARGIN, NOTE_SIZE, PALETTE,
};
use crate::store::{KeyValueStore, NOTES_KEY};
use log::{debug, info};
use rand::Rng;
use uuid::Uuid;

/// Sticky notes pinned over the book, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StickyNoteRepository {
    notes: Vec<StickyNote>,
}

impl StickyNoteRepository {
    pub fn load<S: KeyValueStore>(store: &S) -> Result<Self> {
        let notes = match store.get(NOTES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(DiaryError::Serialization)?,
            None => Vec::new(),
        };
        info!("event=notes_load count={}", notes.len());
        Ok(Self { notes })
    }

    /// Create a note centred on `at` (container-relative), kept inside `bounds`.
    ///
    /// Colour and tilt are drawn from `rng` once, here, and never again.
    pub fn place<S: KeyValueStore, R: Rng + ?Sized>(
        &mut self,
        store: &mut S,
        at: Point,
        bounds: Bounds,
        rng: &mut R,
    ) -> Result<StickyNote> {
        let color = PALETTE[rng.random_range(0..PALETTE.len())];
        let rotation = rng.random_range(-MAX_TILT_DEG..MAX_TILT_DEG);
        let note = StickyNote {
            id: Uuid::new_v4().to_string(),
            x: clamp_axis(at.x, bounds.width),
            y: clamp_axis(at.y, bounds.height),
            text: String::new(),
            color: color.into(),
            rotation,
        };

        let mut next = self.notes.clone();
        next.push(note.clone());
        self.commit(store, next)?;
        info!(
            "event=note_place id={} x={} y={} color={}",
            note.id, note.x, note.y, color.name
        );
        Ok(note)
    }

    /// Merge `patch` into the note with `id` and persist.
    pub fn update<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        id: &str,
        patch: &NotePatch,
    ) -> Result<bool> {
        let mut next = self.notes.clone();
        let found = match next.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                patch.apply(note);
                true
            }
            None => {
                debug!("event=note_update status=ignored reason=unknown_id id={}", id);
                false
            }
        };
        self.commit(store, next)?;
        Ok(found)
    }

    /// Drop the note wherever the drag ended. `pointer` is container-relative
    /// and marks the note's centre; the result is not clamped to the container.
    pub fn drag_to<S: KeyValueStore>(
        &mut self,
        store: &mut S,
        id: &str,
        pointer: Point,
    ) -> Result<bool> {
        let half = NOTE_SIZE / 2.0;
        let (x, y) = (pointer.x - half, pointer.y - half);
        let moved = self.update(store, id, &NotePatch::position(x, y))?;
        if moved {
            info!("event=note_drag id={} x={} y={}", id, x, y);
        }
        Ok(moved)
    }

    pub fn remove<S: KeyValueStore>(&mut self, store: &mut S, id: &str) -> Result<bool> {
        let mut next = self.notes.clone();
        next.retain(|n| n.id != id);
        let removed = next.len() != self.notes.len();
        self.commit(store, next)?;
        if removed {
            info!("event=note_remove id={}", id);
        } else {
            debug!("event=note_remove status=ignored reason=unknown_id id={}", id);
        }
        Ok(removed)
    }

    pub fn persist<S: KeyValueStore>(&self, store: &mut S) -> Result<()> {
        write(store, &self.notes)
    }

    /// Write `next` and only then adopt it.
    fn commit<S: KeyValueStore>(&mut self, store: &mut S, next: Vec<StickyNote>) -> Result<()> {
        write(store, &next)?;
        self.notes = next;
        Ok(())
    }

    /// Find a note by full id, or by an id prefix that matches exactly one note.
    pub fn resolve(&self, id_or_prefix: &str) -> Option<&StickyNote> {
        if id_or_prefix.is_empty() {
            return None;
        }
        if let Some(exact) = self.notes.iter().find(|n| n.id == id_or_prefix) {
            return Some(exact);
        }
        let mut matches = self.notes.iter().filter(|n| n.id.starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    pub fn get(&self, id: &str) -> Option<&StickyNote> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn notes(&self) -> &[StickyNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

fn write<S: KeyValueStore>(store: &mut S, notes: &[StickyNote]) -> Result<()> {
    let raw = serde_json::to_string(notes).map_err(DiaryError::Serialization)?;
    store.set(NOTES_KEY, &raw)
}

/// Centre a note on `click` along one axis, then keep it inside `[margin, extent - size]`.
fn clamp_axis(click: f64, extent: f64) -> f64 {
    (click - NOTE_SIZE / 2.0).min(extent - NOTE_SIZE).max(NOTE_MARGIN)
}
