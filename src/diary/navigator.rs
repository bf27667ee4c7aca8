//! # Book Navigator
//!
//! Tracks which spread is open and drives the page-flip state machine:
//!
//! ```text
//!            request_flip(dir)               animation_complete
//!   Idle ───────────────────────▶ Flipping(dir) ──────────────────▶ Idle
//!    ▲   (guard: boundary, idle)                  left_index ± 2
//! ```
//!
//! Requests that fail the guard are ignored rather than reported. Only one
//! flip is ever in flight. The navigator knows nothing about how the flip is
//! animated: whoever runs the animation calls [`BookNavigator::animation_complete`]
//! when it ends.

use crate::model::Direction;
use log::{debug, info};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipState {
    Idle,
    Flipping(Direction),
}

/// Page positions shown on the two faces of the turning sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlipPages {
    /// The page leaving the spread (front face).
    pub from: usize,
    /// The page being revealed (back face).
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookNavigator {
    left_index: usize,
    page_count: usize,
    state: FlipState,
}

impl BookNavigator {
    /// A navigator over `page_count` pages, open at the first spread.
    pub fn new(page_count: usize) -> Self {
        debug_assert!(
            page_count >= 2 && page_count % 2 == 0,
            "page count must be even and non-zero"
        );
        Self {
            left_index: 0,
            page_count,
            state: FlipState::Idle,
        }
    }

    pub fn left_index(&self) -> usize {
        self.left_index
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn state(&self) -> FlipState {
        self.state
    }

    pub fn is_flipping(&self) -> bool {
        matches!(self.state, FlipState::Flipping(_))
    }

    pub fn direction(&self) -> Option<Direction> {
        match self.state {
            FlipState::Flipping(dir) => Some(dir),
            FlipState::Idle => None,
        }
    }

    /// Another spread exists beyond the current right page.
    pub fn can_forward(&self) -> bool {
        self.left_index + 1 < self.page_count.saturating_sub(1)
    }

    pub fn can_backward(&self) -> bool {
        self.left_index > 0
    }

    /// Positions of the visible (left, right) pages.
    pub fn spread(&self) -> (usize, usize) {
        (self.left_index, self.left_index + 1)
    }

    /// One-based page numbers printed under the spread.
    pub fn page_numbers(&self) -> (usize, usize) {
        (self.left_index + 1, self.left_index + 2)
    }

    /// Start a flip. Returns `false` (and changes nothing) when a flip is
    /// already running or the book cannot move that way.
    pub fn request_flip(&mut self, dir: Direction) -> bool {
        if self.is_flipping() {
            debug!(
                "event=flip_request status=ignored reason=in_flight dir={}",
                dir
            );
            return false;
        }
        let allowed = match dir {
            Direction::Forward => self.can_forward(),
            Direction::Backward => self.can_backward(),
        };
        if !allowed {
            debug!(
                "event=flip_request status=ignored reason=boundary dir={} left={}",
                dir, self.left_index
            );
            return false;
        }
        self.state = FlipState::Flipping(dir);
        info!("event=flip_start dir={} left={}", dir, self.left_index);
        true
    }

    /// The running flip finished: move the spread and go idle.
    ///
    /// Returns the direction that completed, or `None` if nothing was flipping.
    pub fn animation_complete(&mut self) -> Option<Direction> {
        let dir = self.direction()?;
        self.left_index = match dir {
            Direction::Forward => self.left_index + 2,
            Direction::Backward => self.left_index - 2,
        };
        self.state = FlipState::Idle;
        info!("event=flip_complete dir={} left={}", dir, self.left_index);
        Some(dir)
    }

    /// Pages on the turning sheet while a flip is running.
    ///
    /// Forward turns the right page away to reveal the next spread's left page;
    /// backward turns the left page back to reveal the previous spread's right page.
    pub fn flip_pages(&self) -> Option<FlipPages> {
        match self.direction()? {
            Direction::Forward => Some(FlipPages {
                from: self.left_index + 1,
                to: self.left_index + 2,
            }),
            Direction::Backward => Some(FlipPages {
                from: self.left_index,
                to: self.left_index - 1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip(nav: &mut BookNavigator, dir: Direction) -> bool {
        let started = nav.request_flip(dir);
        if started {
            nav.animation_complete();
        }
        started
    }

    fn assert_invariant(nav: &BookNavigator) {
        assert_eq!(nav.left_index() % 2, 0);
        assert!(nav.left_index() <= nav.page_count() - 2);
    }

    #[test]
    fn test_starts_idle_at_first_spread() {
        let nav = BookNavigator::new(8);
        assert_eq!(nav.left_index(), 0);
        assert_eq!(nav.state(), FlipState::Idle);
        assert_eq!(nav.spread(), (0, 1));
        assert_eq!(nav.page_numbers(), (1, 2));
        assert!(nav.can_forward());
        assert!(!nav.can_backward());
    }

    #[test]
    fn test_forward_flip_moves_by_two_on_completion() {
        let mut nav = BookNavigator::new(8);
        assert!(nav.request_flip(Direction::Forward));
        assert_eq!(nav.left_index(), 0);
        assert_eq!(nav.state(), FlipState::Flipping(Direction::Forward));

        assert_eq!(nav.animation_complete(), Some(Direction::Forward));
        assert_eq!(nav.left_index(), 2);
        assert!(!nav.is_flipping());
    }

    #[test]
    fn test_backward_flip_moves_back_by_two() {
        let mut nav = BookNavigator::new(8);
        flip(&mut nav, Direction::Forward);
        flip(&mut nav, Direction::Forward);
        assert_eq!(nav.left_index(), 4);

        assert!(flip(&mut nav, Direction::Backward));
        assert_eq!(nav.left_index(), 2);
    }

    #[test]
    fn test_forward_rejected_on_last_spread() {
        let mut nav = BookNavigator::new(4);
        flip(&mut nav, Direction::Forward);
        assert_eq!(nav.left_index(), 2);
        assert!(!nav.can_forward());

        let before = nav.clone();
        assert!(!nav.request_flip(Direction::Forward));
        assert_eq!(nav, before);
    }

    #[test]
    fn test_backward_rejected_on_first_spread() {
        let mut nav = BookNavigator::new(8);
        let before = nav.clone();
        assert!(!nav.request_flip(Direction::Backward));
        assert_eq!(nav, before);
    }

    #[test]
    fn test_requests_ignored_while_flipping() {
        let mut nav = BookNavigator::new(8);
        flip(&mut nav, Direction::Forward);
        assert!(nav.request_flip(Direction::Forward));

        let before = nav.clone();
        assert!(!nav.request_flip(Direction::Backward));
        assert!(!nav.request_flip(Direction::Forward));
        assert_eq!(nav, before);
        assert_eq!(nav.direction(), Some(Direction::Forward));
    }

    #[test]
    fn test_completion_while_idle_is_ignored() {
        let mut nav = BookNavigator::new(8);
        assert_eq!(nav.animation_complete(), None);
        assert_eq!(nav.left_index(), 0);
    }

    #[test]
    fn test_single_spread_book_cannot_move() {
        let mut nav = BookNavigator::new(2);
        assert!(!nav.can_forward());
        assert!(!nav.can_backward());
        assert!(!flip(&mut nav, Direction::Forward));
        assert!(!flip(&mut nav, Direction::Backward));
    }

    #[test]
    fn test_flip_pages_per_direction() {
        let mut nav = BookNavigator::new(8);
        assert_eq!(nav.flip_pages(), None);

        nav.request_flip(Direction::Forward);
        assert_eq!(nav.flip_pages(), Some(FlipPages { from: 1, to: 2 }));
        nav.animation_complete();

        nav.request_flip(Direction::Backward);
        assert_eq!(nav.flip_pages(), Some(FlipPages { from: 2, to: 1 }));
    }

    #[test]
    fn test_invariant_holds_over_every_reachable_state() {
        for pages in [2usize, 4, 6, 8, 12] {
            let mut nav = BookNavigator::new(pages);
            // Walk a fixed pattern that keeps pushing against both ends.
            let pattern = [
                Direction::Forward,
                Direction::Forward,
                Direction::Backward,
                Direction::Forward,
                Direction::Forward,
                Direction::Forward,
                Direction::Forward,
                Direction::Forward,
                Direction::Backward,
                Direction::Backward,
                Direction::Backward,
                Direction::Backward,
                Direction::Backward,
                Direction::Backward,
            ];
            for dir in pattern {
                if nav.request_flip(dir) {
                    assert_invariant(&nav);
                    assert!(!nav.request_flip(Direction::Backward));
                    assert!(!nav.request_flip(Direction::Forward));
                }
                nav.animation_complete();
                assert_invariant(&nav);
            }
            assert_eq!(nav.left_index(), 0);
        }
    }

    #[test]
    fn test_walks_to_the_end_and_back() {
        let mut nav = BookNavigator::new(8);
        let mut forward = 0;
        while flip(&mut nav, Direction::Forward) {
            forward += 1;
        }
        assert_eq!(forward, 3);
        assert_eq!(nav.left_index(), 6);
        assert_eq!(nav.page_numbers(), (7, 8));

        let mut back = 0;
        while flip(&mut nav, Direction::Backward) {
            back += 1;
        }
        assert_eq!(back, 3);
        assert_eq!(nav.left_index(), 0);
    }
}
