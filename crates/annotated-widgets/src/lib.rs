//! egui integration for the annotated numeric widget.
//!
//! - **Surface**: [`EguiSurface`] paints through an `egui::Painter`
//! - **Theme**: [`theme_from_visuals`] maps egui visuals onto widget colors
//! - **Slider**: [`AnnotatedSlider`] hosts a widget inside a `Ui`
//! - **Prompt**: [`ValuePrompt`] is the tap-to-edit dialog

pub mod prompt;
pub mod slider;
pub mod surface;
pub mod theme;

pub use prompt::ValuePrompt;
pub use slider::AnnotatedSlider;
pub use surface::EguiSurface;
pub use theme::{color_from_egui, color_to_egui, theme_from_visuals};

/// Standard sizing constants.
pub mod sizing {
    /// Font size used for widget text.
    pub const FONT_SIZE: f64 = 12.0;
    /// Outline stroke width.
    pub const STROKE_WIDTH: f32 = 1.0;
    /// Distance from the text baseline to the bottom of the laid-out row, as a fraction of the font size.
    pub const DESCENT: f64 = 0.25;
}
