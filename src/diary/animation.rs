//! Presentation model of the turning sheet.
//!
//! The overlay is a sheet hinged on one edge, rotating about the Y axis. This
//! module only describes where it starts, where it ends and how long it takes;
//! a client drives its own timer and reports completion to the navigator.

use crate::model::Direction;
use serde::Serialize;
use std::time::Duration;

/// Default pause before the sheet's transform is driven to its end state.
pub const DEFAULT_START_DELAY: Duration = Duration::from_millis(20);

/// Default length of the turn.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(900);

/// Control points of the easing curve, `cubic-bezier(0.22, 1, 0.36, 1)`.
const EASE: (f64, f64, f64, f64) = (0.22, 1.0, 0.36, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hinge {
    Left,
    Right,
}

/// Rotation of the sheet, in degrees about the Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SheetTransform {
    pub hinge: Hinge,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl SheetTransform {
    /// Forward turns the right page over its left edge; backward brings the
    /// left page back over its right edge.
    pub fn for_direction(dir: Direction) -> Self {
        match dir {
            Direction::Forward => Self {
                hinge: Hinge::Left,
                start_deg: 0.0,
                end_deg: -180.0,
            },
            Direction::Backward => Self {
                hinge: Hinge::Right,
                start_deg: -180.0,
                end_deg: 0.0,
            },
        }
    }

    /// Angle at `progress` in `[0, 1]` along the eased curve.
    pub fn rotation_at(&self, progress: f64) -> f64 {
        let eased = ease(progress.clamp(0.0, 1.0));
        self.start_deg + (self.end_deg - self.start_deg) * eased
    }
}

/// Timing of one flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipTimeline {
    pub start_delay: Duration,
    pub duration: Duration,
}

impl Default for FlipTimeline {
    fn default() -> Self {
        Self {
            start_delay: DEFAULT_START_DELAY,
            duration: DEFAULT_DURATION,
        }
    }
}

impl FlipTimeline {
    pub fn new(start_delay: Duration, duration: Duration) -> Self {
        Self {
            start_delay,
            duration,
        }
    }

    /// Linear progress of the transition `elapsed` after the flip was requested.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        let Some(running) = elapsed.checked_sub(self.start_delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        (running.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Total time from request to completion.
    pub fn total(&self) -> Duration {
        self.start_delay + self.duration
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.total()
    }
}

/// Evaluate the easing curve at time fraction `x`.
fn ease(x: f64) -> f64 {
    let (x1, y1, x2, y2) = EASE;
    let bezier = |t: f64, p1: f64, p2: f64| {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    };

    // x(t) is monotonic on [0, 1] for these control points, so bisect.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..40 {
        let mid = (lo + hi) / 2.0;
        if bezier(mid, x1, x2) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier((lo + hi) / 2.0, y1, y2)
}
