//! # API Facade
//!
//! [`DiaryApi`] is the composition root of the diary. It owns the store, both
//! repositories, the navigator and the placement controller, and is the single
//! entry point a client talks to. Components never reach each other directly:
//! the API routes every event (text edit, flip request, animation end, click,
//! drag) to the component that owns the affected state.
//!
//! ## What the API Does NOT Do
//!
//! - **I/O to the user**: no stdout, stderr or terminal assumptions
//! - **Timing**: flips are started with [`DiaryApi::request_flip`] and finished
//!   with [`DiaryApi::complete_flip`]; running the clock in between is the
//!   client's job
//!
//! ## Generic Over KeyValueStore
//!
//! - Production: `DiaryApi<FileStore>`
//! - Testing: `DiaryApi<InMemoryStore>`

use crate::animation::SheetTransform;
use crate::config::DiaryConfig;
use crate::entries::EntryRepository;
use crate::error::Result;
use crate::model::{Bounds, Direction, Entry, NotePatch, Point, StickyNote};
use crate::navigator::BookNavigator;
use crate::notes::StickyNoteRepository;
use crate::placement::PlacementController;
use crate::store::KeyValueStore;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

pub const BOOK_TITLE: &str = "My Diary";

/// Settings the composition root needs at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct DiaryOptions {
    pub page_count: usize,
    pub bounds: Bounds,
    pub new_link: String,
}

impl From<&DiaryConfig> for DiaryOptions {
    fn from(config: &DiaryConfig) -> Self {
        Self {
            page_count: config.page_count,
            bounds: config.bounds(),
            new_link: config.new_link.clone(),
        }
    }
}

impl Default for DiaryOptions {
    fn default() -> Self {
        Self::from(&DiaryConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    pub affected_notes: Vec<StickyNote>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_note(mut self, note: StickyNote) -> Self {
        self.affected_notes.push(note);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub id: usize,
    /// One-based position in the book.
    pub number: usize,
    pub text: String,
}

impl PageView {
    fn at(entries: &EntryRepository, index: usize) -> Option<Self> {
        entries.get(index).map(|entry| Self {
            id: entry.id,
            number: index + 1,
            text: entry.text.clone(),
        })
    }
}

/// The turning sheet while a flip is in flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlipView {
    pub direction: Direction,
    pub from: PageView,
    pub to: PageView,
    pub transform: SheetTransform,
}

/// Everything a client needs to draw the screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookView {
    pub title: &'static str,
    pub placing: bool,
    pub new_link: String,
    pub left: PageView,
    pub right: PageView,
    pub can_back: bool,
    pub can_forward: bool,
    pub flipping: bool,
    pub flip: Option<FlipView>,
    pub notes: Vec<StickyNote>,
    pub page_count: usize,
    pub bounds: Bounds,
}

/// The main API facade for diary operations.
pub struct DiaryApi<S: KeyValueStore> {
    store: S,
    options: DiaryOptions,
    entries: EntryRepository,
    notes: StickyNoteRepository,
    navigator: BookNavigator,
    placement: PlacementController,
    rng: StdRng,
}

impl<S: KeyValueStore> DiaryApi<S> {
    /// Load both records and open the book at its first spread.
    ///
    /// Unreadable stored data is returned as an error; nothing is repaired.
    pub fn open(mut store: S, options: DiaryOptions) -> Result<Self> {
        let entries = EntryRepository::load(&store, options.page_count)?;
        let notes = StickyNoteRepository::load(&store)?;
        entries.persist(&mut store)?;
        notes.persist(&mut store)?;

        let navigator = BookNavigator::new(entries.len());
        Ok(Self {
            store,
            options,
            entries,
            notes,
            navigator,
            placement: PlacementController::new(),
            rng: StdRng::from_os_rng(),
        })
    }

    /// Replace the random source used for note colours and tilt.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn view(&self) -> BookView {
        let (left, right) = self.navigator.spread();
        let flip = self.navigator.flip_pages().and_then(|pages| {
            Some(FlipView {
                direction: self.navigator.direction()?,
                from: PageView::at(&self.entries, pages.from)?,
                to: PageView::at(&self.entries, pages.to)?,
                transform: SheetTransform::for_direction(self.navigator.direction()?),
            })
        });

        BookView {
            title: BOOK_TITLE,
            placing: self.placement.is_placing(),
            new_link: self.options.new_link.clone(),
            left: self.page_view(left),
            right: self.page_view(right),
            can_back: self.navigator.can_backward(),
            can_forward: self.navigator.can_forward(),
            flipping: self.navigator.is_flipping(),
            flip,
            notes: self.notes.notes().to_vec(),
            page_count: self.entries.len(),
            bounds: self.options.bounds,
        }
    }

    fn page_view(&self, index: usize) -> PageView {
        PageView::at(&self.entries, index).unwrap_or(PageView {
            id: index,
            number: index + 1,
            text: String::new(),
        })
    }

    // --- Pages ---

    /// Replace the text of entry `id`. Works the same whether or not a flip is running.
    pub fn update_entry(&mut self, id: usize, text: impl Into<String>) -> Result<CmdResult> {
        if self.entries.update(&mut self.store, id, text)? {
            Ok(CmdResult::default())
        } else {
            Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
                "No page with id {}",
                id
            ))))
        }
    }

    /// Replace the text of the page at one-based `number`.
    pub fn write_page(&mut self, number: usize, text: impl Into<String>) -> Result<CmdResult> {
        let Some(id) = self.entry_id_for_page(number) else {
            return Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
                "Page {} does not exist (the diary has {} pages)",
                number,
                self.entries.len()
            ))));
        };
        self.update_entry(id, text)?;
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Page {} saved",
            number
        ))))
    }

    pub fn entry_id_for_page(&self, number: usize) -> Option<usize> {
        number
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .map(|entry| entry.id)
    }

    // --- Navigation ---

    /// Start a flip. Returns `false` if it was ignored.
    pub fn request_flip(&mut self, dir: Direction) -> bool {
        self.navigator.request_flip(dir)
    }

    /// Deliver the animation-completion event.
    pub fn complete_flip(&mut self) -> Option<Direction> {
        self.navigator.animation_complete()
    }

    /// Flip, without animation, until the spread shows page `number`.
    /// Returns `false` when the page does not exist.
    pub fn turn_to_page(&mut self, number: usize) -> bool {
        if number == 0 || number > self.entries.len() {
            return false;
        }
        self.complete_flip();
        let target_left = (number - 1) / 2 * 2;
        while self.navigator.left_index() != target_left {
            let dir = if self.navigator.left_index() < target_left {
                Direction::Forward
            } else {
                Direction::Backward
            };
            if !self.navigator.request_flip(dir) {
                return false;
            }
            self.navigator.animation_complete();
        }
        true
    }

    // --- Sticky notes ---

    pub fn toggle_placing(&mut self) -> bool {
        self.placement.toggle()
    }

    /// A click at `client` coordinates. Places a note if placing mode is on.
    pub fn click(&mut self, client: Point) -> Result<CmdResult> {
        let Some(at) = self.placement.click(client, self.options.bounds) else {
            return Ok(CmdResult::default());
        };
        let note = self
            .notes
            .place(&mut self.store, at, self.options.bounds, &mut self.rng)?;
        Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "Sticky note placed ({})",
                note.short_id()
            )))
            .with_note(note))
    }

    /// End of a drag, with the pointer at `pointer` (container-relative).
    pub fn drag_note(&mut self, id: &str, pointer: Point) -> Result<CmdResult> {
        let Some(id) = self.resolve_note_id(id) else {
            return Ok(unknown_note(id));
        };
        self.notes.drag_to(&mut self.store, &id, pointer)?;
        Ok(self.note_result(&id))
    }

    pub fn edit_note(&mut self, id: &str, text: impl Into<String>) -> Result<CmdResult> {
        let Some(id) = self.resolve_note_id(id) else {
            return Ok(unknown_note(id));
        };
        self.notes
            .update(&mut self.store, &id, &NotePatch::text(text))?;
        Ok(self.note_result(&id))
    }

    pub fn remove_note(&mut self, id: &str) -> Result<CmdResult> {
        let Some(id) = self.resolve_note_id(id) else {
            return Ok(unknown_note(id));
        };
        let short = id.get(..8).unwrap_or(&id).to_string();
        self.notes.remove(&mut self.store, &id)?;
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Sticky note removed ({})",
            short
        ))))
    }

    /// Full id of the note matching `id_or_prefix`.
    pub fn resolve_note_id(&self, id_or_prefix: &str) -> Option<String> {
        self.notes.resolve(id_or_prefix).map(|n| n.id.clone())
    }

    fn note_result(&self, id: &str) -> CmdResult {
        match self.notes.get(id) {
            Some(note) => CmdResult::default().with_note(note.clone()),
            None => CmdResult::default(),
        }
    }

    // --- Toolbar ---

    /// Re-read both records and reopen the book at its first spread.
    pub fn reload(&mut self) -> Result<CmdResult> {
        let entries = EntryRepository::load(&self.store, self.options.page_count)?;
        let notes = StickyNoteRepository::load(&self.store)?;
        self.navigator = BookNavigator::new(entries.len());
        self.entries = entries;
        self.notes = notes;
        self.placement.cancel();
        info!("event=reload pages={} notes={}", self.entries.len(), self.notes.len());
        Ok(CmdResult::default().with_message(CmdMessage::info("Reloaded")))
    }

    /// Where the toolbar's "New" action points.
    pub fn new_link(&self) -> &str {
        &self.options.new_link
    }

    // --- Accessors ---

    pub fn entries(&self) -> &[Entry] {
        self.entries.entries()
    }

    pub fn notes(&self) -> &[StickyNote] {
        self.notes.notes()
    }

    pub fn navigator(&self) -> &BookNavigator {
        &self.navigator
    }

    pub fn is_placing(&self) -> bool {
        self.placement.is_placing()
    }

    pub fn bounds(&self) -> Bounds {
        self.options.bounds
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn unknown_note(id: &str) -> CmdResult {
    CmdResult::default().with_message(CmdMessage::warning(format!(
        "No sticky note matches {}",
        id
    )))
}
