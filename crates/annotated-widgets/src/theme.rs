//! Color conversion between egui and widget themes.

use annotated_core::Theme;
use egui::{Color32, Visuals};
use peniko::Color;

/// Convert a widget color to egui.
pub fn color_to_egui(color: Color) -> Color32 {
    let rgba = color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Convert an egui color to a widget color.
pub fn color_from_egui(color: Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::from_rgba8(r, g, b, a)
}

/// Build a widget theme from the current egui visuals.
pub fn theme_from_visuals(visuals: &Visuals) -> Theme {
    Theme {
        outline: color_from_egui(visuals.weak_text_color()),
        background: color_from_egui(visuals.extreme_bg_color),
        text: color_from_egui(visuals.strong_text_color()),
        secondary_text: color_from_egui(visuals.text_color()),
    }
}
