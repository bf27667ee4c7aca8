use crate::model::{Bounds, Point};
use log::debug;

/// Placing mode: while on, the next click inside the book becomes a sticky note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementController {
    placing: bool,
}

impl PlacementController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_placing(&self) -> bool {
        self.placing
    }

    /// Flip placing mode, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.placing = !self.placing;
        debug!("event=placement_toggle placing={}", self.placing);
        self.placing
    }

    pub fn cancel(&mut self) {
        self.placing = false;
    }

    /// Consume a click given in client coordinates.
    ///
    /// Returns the container-relative point a note should be placed at, and
    /// leaves placing mode. Clicks outside the container, or while not
    /// placing, return `None` and pass through untouched.
    pub fn click(&mut self, client: Point, container: Bounds) -> Option<Point> {
        if !self.placing || !container.contains(client) {
            return None;
        }
        self.placing = false;
        Some(container.to_local(client))
    }
}
