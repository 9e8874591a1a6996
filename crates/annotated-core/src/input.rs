//! Pointer events delivered to a widget.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};

/// A pointer event in node-local coordinates.
///
/// `x` runs from the left edge of the node; the widget spans `0..width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
    },
    Move {
        position: Point,
        /// Pointer movement since the previous event.
        delta: Vec2,
    },
    Up {
        position: Point,
        /// Time between the matching down and this up.
        click_time: Duration,
    },
}

impl PointerEvent {
    /// Position of the pointer.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => *position,
        }
    }

    /// Event name as hosts report it.
    pub fn kind(&self) -> &'static str {
        match self {
            PointerEvent::Down { .. } => "pointerdown",
            PointerEvent::Move { .. } => "pointermove",
            PointerEvent::Up { .. } => "pointerup",
        }
    }
}

/// Measures press-to-release time for tap detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClickTimer {
    pressed_at: Option<Instant>,
}

impl ClickTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press.
    pub fn press(&mut self, now: Instant) {
        self.pressed_at = Some(now);
    }

    /// Record a release and return the time since the press.
    ///
    /// A release without a press reports `Duration::MAX` so it never counts as a tap.
    pub fn release(&mut self, now: Instant) -> Duration {
        match self.pressed_at.take() {
            Some(pressed) => now.saturating_duration_since(pressed),
            None => Duration::MAX,
        }
    }

    /// Whether a press is being tracked.
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }
}
