//! View zoom state.

use serde::{Deserialize, Serialize};

/// Scale above which widgets draw text and icons.
pub const DETAIL_SCALE_THRESHOLD: f64 = 0.5;

/// Zoom state of the canvas the widget is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Current zoom scale (1.0 = 100%).
    pub scale: f64,
}

impl Default for View {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scale(scale: f64) -> Self {
        Self { scale }
    }

    /// Whether widgets draw their full detail at this scale.
    pub fn shows_detail(&self) -> bool {
        self.scale > DETAIL_SCALE_THRESHOLD
    }
}
