//! `Surface` implementation over an egui painter.

use crate::sizing;
use crate::theme::color_to_egui;
use annotated_core::surface::PathPart;
use annotated_core::{Font, FontFamily, Surface, TextAlign};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, pos2};
use kurbo::{Point, RoundedRect};
use peniko::Color;

#[derive(Debug, Clone, Copy)]
struct StyleState {
    fill: Color,
    stroke: Color,
    font: Font,
    align: TextAlign,
}

/// Paints widget draw calls with an egui painter.
///
/// Widget coordinates are offset by `origin`, the screen position of the
/// widget row's top-left corner.
pub struct EguiSurface<'p> {
    painter: &'p Painter,
    origin: Pos2,
    path: Vec<PathPart>,
    state: StyleState,
    stack: Vec<StyleState>,
}

impl<'p> EguiSurface<'p> {
    pub fn new(painter: &'p Painter, origin: Pos2) -> Self {
        Self {
            painter,
            origin,
            path: Vec::new(),
            state: StyleState {
                fill: Color::BLACK,
                stroke: Color::BLACK,
                font: Font::new(sizing::FONT_SIZE, FontFamily::SansSerif),
                align: TextAlign::Left,
            },
            stack: Vec::new(),
        }
    }

    fn to_screen(&self, point: Point) -> Pos2 {
        pos2(
            self.origin.x + point.x as f32,
            self.origin.y + point.y as f32,
        )
    }

    fn to_screen_rect(&self, rect: kurbo::Rect) -> Rect {
        Rect::from_min_max(
            self.to_screen(Point::new(rect.x0, rect.y0)),
            self.to_screen(Point::new(rect.x1, rect.y1)),
        )
    }

    fn font_id(&self) -> FontId {
        let size = self.state.font.size as f32;
        match self.state.font.family {
            FontFamily::SansSerif => FontId::proportional(size),
            FontFamily::Monospace => FontId::monospace(size),
        }
    }
}

fn corner_radius(rect: &RoundedRect) -> f32 {
    rect.radii().top_left as f32
}

impl Surface for EguiSurface<'_> {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn rect(&mut self, rect: kurbo::Rect) {
        self.path.push(PathPart::Rect(rect));
    }

    fn round_rect(&mut self, rect: RoundedRect) {
        self.path.push(PathPart::RoundedRect(rect));
    }

    fn move_to(&mut self, point: Point) {
        self.path.push(PathPart::Polyline(vec![point]));
    }

    fn line_to(&mut self, point: Point) {
        match self.path.last_mut() {
            Some(PathPart::Polyline(points)) => points.push(point),
            _ => self.path.push(PathPart::Polyline(vec![point])),
        }
    }

    fn fill(&mut self) {
        let color = color_to_egui(self.state.fill);
        for part in &self.path {
            match part {
                PathPart::Rect(rect) => {
                    self.painter.rect_filled(self.to_screen_rect(*rect), 0.0, color);
                }
                PathPart::RoundedRect(rect) => {
                    self.painter.rect_filled(
                        self.to_screen_rect(rect.rect()),
                        corner_radius(rect),
                        color,
                    );
                }
                PathPart::Polyline(points) if points.len() >= 3 => {
                    let points = points.iter().map(|p| self.to_screen(*p)).collect();
                    self.painter
                        .add(Shape::convex_polygon(points, color, Stroke::NONE));
                }
                PathPart::Polyline(_) => {}
            }
        }
    }

    fn stroke(&mut self) {
        let stroke = Stroke::new(sizing::STROKE_WIDTH, color_to_egui(self.state.stroke));
        for part in &self.path {
            match part {
                PathPart::Rect(rect) => {
                    self.painter.rect_stroke(
                        self.to_screen_rect(*rect),
                        0.0,
                        stroke,
                        StrokeKind::Inside,
                    );
                }
                PathPart::RoundedRect(rect) => {
                    self.painter.rect_stroke(
                        self.to_screen_rect(rect.rect()),
                        corner_radius(rect),
                        stroke,
                        StrokeKind::Inside,
                    );
                }
                PathPart::Polyline(points) => {
                    let points = points.iter().map(|p| self.to_screen(*p)).collect();
                    self.painter.add(Shape::line(points, stroke));
                }
            }
        }
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
        let anchor = match self.state.align {
            TextAlign::Left => Align2::LEFT_BOTTOM,
            TextAlign::Center => Align2::CENTER_BOTTOM,
            TextAlign::Right => Align2::RIGHT_BOTTOM,
        };
        // egui anchors on the row box; shift down so `position.y` is the baseline
        let bottom = Point::new(
            position.x,
            position.y + self.state.font.size * sizing::DESCENT,
        );
        self.painter.text(
            self.to_screen(bottom),
            anchor,
            text,
            self.font_id(),
            color_to_egui(self.state.fill),
        );
    }

    fn measure_text(&self, text: &str) -> f64 {
        let galley = self
            .painter
            .layout_no_wrap(text.to_string(), self.font_id(), Color32::WHITE);
        galley.size().x as f64
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

#[cfg(test)]
mod tests {
    use super::*;

    fn with_painter(check: impl Fn(&Painter)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| check(ui.painter()));
        });
    }

    #[test]
    fn test_measure_grows_with_text() {
        with_painter(|painter| {
            let surface = EguiSurface::new(painter, Pos2::ZERO);
            let short = surface.measure_text("1");
            let long = surface.measure_text("1234567");
            assert!(short > 0.0);
            assert!(long > short);
        });
    }

    #[test]
    fn test_save_restore_and_origin() {
        with_painter(|painter| {
            let mut surface = EguiSurface::new(painter, pos2(100.0, 50.0));
            surface.save();
            surface.set_font(surface.font().monospace());
            surface.set_text_align(TextAlign::Right);
            surface.restore();
            assert_eq!(surface.font().family, FontFamily::SansSerif);
            assert_eq!(surface.text_align(), TextAlign::Left);
            assert_eq!(surface.to_screen(Point::new(5.0, 5.0)), pos2(105.0, 55.0));
        });
    }
}
