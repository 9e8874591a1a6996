//! In-memory surface that records draw calls.

use super::{Font, FontFamily, Surface, TextAlign};
use kurbo::{Point, Rect, RoundedRect};
use peniko::Color;
use std::fmt;

/// Advance per character as a fraction of the font size.
const SANS_ADVANCE: f64 = 0.55;
const MONO_ADVANCE: f64 = 0.6;

/// One piece of a path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathPart {
    Rect(Rect),
    RoundedRect(RoundedRect),
    /// Points of a subpath started with `move_to`.
    Polyline(Vec<Point>),
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        path: Vec<PathPart>,
        color: Color,
    },
    Stroke {
        path: Vec<PathPart>,
        color: Color,
    },
    Text {
        text: String,
        position: Point,
        align: TextAlign,
        font: Font,
        color: Color,
    },
}

impl DrawCommand {
    /// Text of a text command.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Fill { path, color } => {
                let rgba = color.to_rgba8();
                write!(
                    f,
                    "fill {} part(s) #{:02x}{:02x}{:02x}",
                    path.len(),
                    rgba.r,
                    rgba.g,
                    rgba.b
                )
            }
            DrawCommand::Stroke { path, color } => {
                let rgba = color.to_rgba8();
                write!(
                    f,
                    "stroke {} part(s) #{:02x}{:02x}{:02x}",
                    path.len(),
                    rgba.r,
                    rgba.g,
                    rgba.b
                )
            }
            DrawCommand::Text {
                text,
                position,
                align,
                ..
            } => write!(
                f,
                "text {:?} at ({:.1}, {:.1}) {:?}",
                text, position.x, position.y, align
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct StyleState {
    fill: Color,
    stroke: Color,
    font: Font,
    align: TextAlign,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::BLACK,
            font: Font::default(),
            align: TextAlign::Left,
        }
    }
}

/// Surface that records every fill, stroke and text call.
///
/// Text is measured with a fixed advance per character so layouts are
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    path: Vec<PathPart>,
    state: StyleState,
    stack: Vec<StyleState>,
}

impl RecordingSurface {
    /// Create an empty surface with the default 12px sans-serif font.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface with the given font.
    pub fn with_font(font: Font) -> Self {
        let mut surface = Self::new();
        surface.state.font = font;
        surface
    }

    /// Recorded commands in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the surface empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// All drawn strings in call order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands.iter().filter_map(DrawCommand::text).collect()
    }

    /// Current fill color.
    pub fn fill_color(&self) -> Color {
        self.state.fill
    }

    /// Number of unrestored `save` calls.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn current_polyline(&mut self) -> &mut Vec<Point> {
        if !matches!(self.path.last(), Some(PathPart::Polyline(_))) {
            self.path.push(PathPart::Polyline(Vec::new()));
        }
        match self.path.last_mut() {
            Some(PathPart::Polyline(points)) => points,
            _ => unreachable!("polyline pushed above"),
        }
    }
}

impl Surface for RecordingSurface {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn rect(&mut self, rect: Rect) {
        self.path.push(PathPart::Rect(rect));
    }

    fn round_rect(&mut self, rect: RoundedRect) {
        self.path.push(PathPart::RoundedRect(rect));
    }

    fn move_to(&mut self, point: Point) {
        self.path.push(PathPart::Polyline(vec![point]));
    }

    fn line_to(&mut self, point: Point) {
        self.current_polyline().push(point);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill {
            path: self.path.clone(),
            color: self.state.fill,
        });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke {
            path: self.path.clone(),
            color: self.state.stroke,
        });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn font(&self) -> Font {
        self.state.font
    }

    fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    fn text_align(&self) -> TextAlign {
        self.state.align
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn fill_text(&mut self, text: &str, position: Point) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            align: self.state.align,
            font: self.state.font,
            color: self.state.fill,
        });
    }

    fn measure_text(&self, text: &str) -> f64 {
        let advance = match self.state.font.family {
            FontFamily::SansSerif => SANS_ADVANCE,
            FontFamily::Monospace => MONO_ADVANCE,
        };
        text.chars().count() as f64 * advance * self.state.font.size
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }
}
