//! Drawing surface abstraction.
//!
//! The widget paints through [`Surface`], a small canvas-like interface
//! supplied by the host: path construction, fill/stroke, text layout and a
//! save/restore stack for style state. [`RecordingSurface`] keeps the draw
//! calls in memory for tests and headless use.

mod recording;

pub use recording::{DrawCommand, PathPart, RecordingSurface};

use kurbo::{Point, Rect, RoundedRect};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Font family used for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    SansSerif,
    Monospace,
}

/// Font used for text drawing and measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Size in logical pixels.
    pub size: f64,
    /// Family.
    pub family: FontFamily,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 12.0,
            family: FontFamily::SansSerif,
        }
    }
}

impl Font {
    /// Create a font.
    pub fn new(size: f64, family: FontFamily) -> Self {
        Self { size, family }
    }

    /// Same size, monospace family.
    pub fn monospace(self) -> Self {
        Self {
            family: FontFamily::Monospace,
            ..self
        }
    }
}

/// Horizontal anchor of drawn text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A 2D drawing surface.
///
/// Path calls accumulate into a current path that `fill` and `stroke`
/// consume with the current colors. `save`/`restore` push and pop the style
/// state (colors, font, text alignment).
pub trait Surface {
    /// Start a new, empty path.
    fn begin_path(&mut self);

    /// Add a rectangle to the current path.
    fn rect(&mut self, rect: Rect);

    /// Add a rounded rectangle to the current path.
    fn round_rect(&mut self, rect: RoundedRect);

    /// Start a new subpath.
    fn move_to(&mut self, point: Point);

    /// Extend the current subpath.
    fn line_to(&mut self, point: Point);

    /// Fill the current path.
    fn fill(&mut self);

    /// Stroke the current path.
    fn stroke(&mut self);

    fn set_fill_color(&mut self, color: Color);

    fn set_stroke_color(&mut self, color: Color);

    /// Current font.
    fn font(&self) -> Font;

    fn set_font(&mut self, font: Font);

    /// Current text alignment.
    fn text_align(&self) -> TextAlign;

    fn set_text_align(&mut self, align: TextAlign);

    /// Draw text with its baseline at `position.y`, anchored per the current alignment.
    fn fill_text(&mut self, text: &str, position: Point);

    /// Advance width of `text` in the current font.
    fn measure_text(&self, text: &str) -> f64;

    /// Push the style state.
    fn save(&mut self);

    /// Pop the style state. Unbalanced calls are ignored.
    fn restore(&mut self);
}

/// Colors the widget paints with, injected by the host at draw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Outline stroke, muted text and inert glyphs.
    pub outline: Color,
    /// Widget background.
    pub background: Color,
    /// Value text, chevrons and active glyphs.
    pub text: Color,
    /// Label text.
    pub secondary_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            outline: Color::from_rgba8(0x66, 0x66, 0x66, 255),
            background: Color::from_rgba8(0x22, 0x22, 0x22, 255),
            text: Color::from_rgba8(0xdd, 0xdd, 0xdd, 255),
            secondary_text: Color::from_rgba8(0x99, 0x99, 0x99, 255),
        }
    }
}
