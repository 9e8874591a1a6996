//! Painting the widget.

use super::{AnnotatedWidget, DrawContext, MARGIN};
use crate::surface::{Surface, TextAlign, Theme};
use kurbo::{Point, Rect, RoundedRect};

/// Drawn instead of an annotation that does not fit.
pub const ELLIPSIS: &str = "\u{2026}";

/// Offset of the glyph from `width - MARGIN`.
const BUTTON_X: f64 = 33.0;
/// Right edge of the value text is this far left of the widget's right edge.
const VALUE_INSET: f64 = MARGIN * 2.0 + 20.0;
const LABEL_X: f64 = MARGIN * 2.0 + 5.0;
const ANNOTATION_GAP: f64 = 5.0;
const FREE_WIDTH_SLACK: f64 = 40.0;

/// Paint `widget` into its row.
///
/// At low zoom only the background is painted. The text alignment is left
/// at whatever the last text used (`Left` for the background pass, `Right`
/// after the value) rather than restored.
pub(super) fn paint(widget: &AnnotatedWidget, surface: &mut dyn Surface, ctx: &DrawContext<'_>) {
    let theme = ctx.theme;
    let width = ctx.width;
    let (y, h) = (ctx.y, ctx.height);
    let detail = ctx.shows_detail();

    surface.set_text_align(TextAlign::Left);
    surface.set_stroke_color(theme.outline);
    surface.set_fill_color(theme.background);
    surface.begin_path();
    let background = Rect::new(MARGIN, y, width - MARGIN, y + h);
    if detail {
        surface.round_rect(RoundedRect::from_rect(background, h * 0.5));
    } else {
        surface.rect(background);
    }
    surface.fill();

    if !detail {
        return;
    }

    if !widget.disabled {
        surface.stroke();
    }

    let baseline = y + h * 0.7;
    paint_button(widget, surface, theme, width, baseline);

    surface.set_fill_color(theme.text);
    if !widget.disabled {
        paint_chevrons(surface, width, y, h);
    }

    let label = widget.display_label();
    surface.set_fill_color(theme.secondary_text);
    surface.fill_text(label, Point::new(LABEL_X, baseline));

    surface.set_fill_color(theme.text);
    surface.set_text_align(TextAlign::Right);
    let text = widget.formatted_value();
    let mut value_offset = VALUE_INSET;

    if let Some(unit) = widget.options.unit.as_deref().filter(|unit| !unit.is_empty()) {
        let mono = surface.font().monospace();
        surface.save();
        surface.set_font(mono);
        surface.set_fill_color(theme.outline);
        surface.fill_text(unit, Point::new(width - value_offset, baseline));
        value_offset += surface.measure_text(unit);
        surface.restore();
    }
    surface.fill_text(&text, Point::new(width - value_offset, baseline));

    let value_width = surface.measure_text(&text);
    let label_width = surface.measure_text(label);
    let free_width = width - (value_width + label_width + value_offset + FREE_WIDTH_SLACK);

    if let Some(annotation) = widget.annotation_text(free_width) {
        surface.set_fill_color(theme.outline);
        let annotation = if free_width < surface.measure_text(&annotation) {
            ELLIPSIS.to_string()
        } else {
            annotation
        };
        surface.fill_text(
            &annotation,
            Point::new(width - ANNOTATION_GAP - value_width - value_offset, baseline),
        );
    }
}

fn paint_button(
    widget: &AnnotatedWidget,
    surface: &mut dyn Surface,
    theme: &Theme,
    width: f64,
    baseline: f64,
) {
    let state = widget.button_state();
    if !state.is_visible() {
        return;
    }

    let mono = surface.font().monospace();
    surface.save();
    surface.set_font(mono);
    surface.set_fill_color(if state.is_actionable() {
        theme.text
    } else {
        theme.outline
    });
    surface.fill_text(state.glyph(), Point::new(width - MARGIN - BUTTON_X, baseline));
    surface.restore();
}

fn paint_chevrons(surface: &mut dyn Surface, width: f64, y: f64, h: f64) {
    let mid = y + h * 0.5;

    surface.begin_path();
    surface.move_to(Point::new(MARGIN + 16.0, y + 5.0));
    surface.line_to(Point::new(MARGIN + 6.0, mid));
    surface.line_to(Point::new(MARGIN + 16.0, y + h - 5.0));
    surface.fill();

    surface.begin_path();
    surface.move_to(Point::new(width - MARGIN - 16.0, y + 5.0));
    surface.line_to(Point::new(width - MARGIN - 6.0, mid));
    surface.line_to(Point::new(width - MARGIN - 16.0, y + h - 5.0));
    surface.fill();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::{DISABLE_GLYPH, RESET_GLYPH};
    use crate::factory::{InputDescriptor, WidgetStub, make_annotated};
    use crate::host::PropertyNode;
    use crate::options::{AnnotationTable, WidgetOptions};
    use crate::surface::{DrawCommand, FontFamily, PathPart, RecordingSurface};
    use crate::widget::Widget;

    fn widget(value: f64, options: WidgetOptions) -> AnnotatedWidget {
        make_annotated(
            WidgetStub::new("gain").with_value(value).with_options(options),
            InputDescriptor::new("FLOAT", WidgetOptions::new()),
        )
    }

    fn render(widget: &AnnotatedWidget, width: f64, scale: f64) -> RecordingSurface {
        let node = PropertyNode::new(width);
        let theme = Theme::default();
        let ctx = DrawContext::new(&node, &theme, width)
            .with_row(10.0, 20.0)
            .with_scale(scale);
        let mut surface = RecordingSurface::new();
        widget.draw(&mut surface, &ctx);
        surface
    }

    fn text_command<'a>(surface: &'a RecordingSurface, text: &str) -> &'a DrawCommand {
        surface
            .commands()
            .iter()
            .find(|command| command.text() == Some(text))
            .unwrap_or_else(|| panic!("no text {text:?} in {:?}", surface.texts()))
    }

    fn text_x(surface: &RecordingSurface, text: &str) -> f64 {
        match text_command(surface, text) {
            DrawCommand::Text { position, .. } => position.x,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_low_zoom_draws_background_only() {
        let surface = render(&widget(1.0, WidgetOptions::new()), 300.0, 0.5);
        assert_eq!(surface.commands().len(), 1);
        match &surface.commands()[0] {
            DrawCommand::Fill { path, color } => {
                assert_eq!(path, &vec![PathPart::Rect(Rect::new(15.0, 10.0, 285.0, 30.0))]);
                assert_eq!(*color, Theme::default().background);
            }
            other => panic!("expected fill, got {other:?}"),
        }
        assert_eq!(surface.text_align(), TextAlign::Left);
    }

    #[test]
    fn test_detail_draws_pill_label_and_value() {
        let surface = render(&widget(3.14159, WidgetOptions::new()), 300.0, 1.0);
        match &surface.commands()[0] {
            DrawCommand::Fill { path, .. } => match &path[0] {
                PathPart::RoundedRect(rect) => {
                    assert_eq!(rect.rect(), Rect::new(15.0, 10.0, 285.0, 30.0));
                    assert!((rect.radii().top_left - 10.0).abs() < f64::EPSILON);
                }
                other => panic!("expected pill, got {other:?}"),
            },
            other => panic!("expected fill, got {other:?}"),
        }
        assert!(matches!(surface.commands()[1], DrawCommand::Stroke { .. }));
        assert_eq!(surface.texts(), vec!["gain", "3.142"]);

        match text_command(&surface, "gain") {
            DrawCommand::Text { position, align, color, .. } => {
                assert_eq!(*position, Point::new(35.0, 24.0));
                assert_eq!(*align, TextAlign::Left);
                assert_eq!(*color, Theme::default().secondary_text);
            }
            _ => unreachable!(),
        }
        match text_command(&surface, "3.142") {
            DrawCommand::Text { position, align, .. } => {
                assert_eq!(*position, Point::new(250.0, 24.0));
                assert_eq!(*align, TextAlign::Right);
            }
            _ => unreachable!(),
        }
        assert_eq!(surface.text_align(), TextAlign::Right);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_precision() {
        let surface = render(&widget(3.14159, WidgetOptions::new().with_precision(2)), 300.0, 1.0);
        assert!(surface.texts().contains(&"3.14"));
    }

    #[test]
    fn test_chevrons_and_outline() {
        let surface = render(&widget(1.0, WidgetOptions::new()), 300.0, 1.0);
        let fills = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
            .count();
        // background + two chevrons
        assert_eq!(fills, 3);

        let mut w = widget(1.0, WidgetOptions::new());
        w.disabled = true;
        let surface = render(&w, 300.0, 1.0);
        assert!(
            !surface
                .commands()
                .iter()
                .any(|c| matches!(c, DrawCommand::Stroke { .. }))
        );
        let fills = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. }))
            .count();
        assert_eq!(fills, 1);
    }

    #[test]
    fn test_button_glyph_colors() {
        let theme = Theme::default();
        let options = WidgetOptions::new().with_reset(1.0);

        let surface = render(&widget(5.0, options.clone()), 300.0, 1.0);
        match text_command(&surface, RESET_GLYPH) {
            DrawCommand::Text { position, color, font, .. } => {
                assert_eq!(*color, theme.text);
                assert_eq!(font.family, FontFamily::Monospace);
                assert!((position.x - 252.0).abs() < f64::EPSILON);
            }
            _ => unreachable!(),
        }

        let surface = render(&widget(1.0, options), 300.0, 1.0);
        match text_command(&surface, RESET_GLYPH) {
            DrawCommand::Text { color, .. } => assert_eq!(*color, theme.outline),
            _ => unreachable!(),
        }

        let surface = render(&widget(1.0, WidgetOptions::new().with_disable(0.0)), 300.0, 1.0);
        assert!(surface.texts().contains(&DISABLE_GLYPH));
        assert_eq!(surface.font().family, FontFamily::SansSerif);
    }

    #[test]
    fn test_unit_shifts_value() {
        let surface = render(&widget(2.0, WidgetOptions::new().with_unit("Hz")), 300.0, 1.0);
        assert!((text_x(&surface, "Hz") - 250.0).abs() < 1e-9);
        match text_command(&surface, "Hz") {
            DrawCommand::Text { font, color, .. } => {
                assert_eq!(font.family, FontFamily::Monospace);
                assert_eq!(*color, Theme::default().outline);
            }
            _ => unreachable!(),
        }
        // "Hz" is 2 monospace chars at 12px = 14.4
        assert!((text_x(&surface, "2.000") - (250.0 - 14.4)).abs() < 1e-9);
        assert_eq!(surface.font().family, FontFamily::SansSerif);
    }

    #[test]
    fn test_annotation_from_table() {
        let table = AnnotationTable::from_pairs([(0.0, "off"), (1.0, "on")]);
        let options = WidgetOptions::new().with_annotation(table).with_precision(0);

        let surface = render(&widget(1.0, options.clone()), 300.0, 1.0);
        assert_eq!(surface.texts(), vec!["gain", "1", "on"]);
        // value "1" is 6.6 wide: 300 - 5 - 6.6 - 50
        assert!((text_x(&surface, "on") - 238.4).abs() < 1e-9);

        let surface = render(&widget(2.0, options), 300.0, 1.0);
        assert_eq!(surface.texts(), vec!["gain", "2"]);
    }

    #[test]
    fn test_annotation_ellipsis_when_narrow() {
        let table = AnnotationTable::from_pairs([(1.0, "enabled")]);
        let options = WidgetOptions::new().with_annotation(table).with_precision(0);
        let surface = render(&widget(1.0, options), 130.0, 1.0);
        assert!(surface.texts().contains(&ELLIPSIS));
        assert!(!surface.texts().contains(&"enabled"));
    }

    #[test]
    fn test_annotation_fn_gets_free_width() {
        let mut w = widget(1.0, WidgetOptions::new().with_precision(0));
        w.set_annotation(|value, free| Some(format!("{value}/{free:.1}")));
        let surface = render(&w, 300.0, 1.0);
        // 300 - (6.6 + 26.4 + 50 + 40)
        assert!(surface.texts().contains(&"1/177.0"));
    }
}
