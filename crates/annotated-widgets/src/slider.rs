//! Hosts an [`AnnotatedWidget`] inside an egui `Ui`.

use crate::surface::EguiSurface;
use crate::theme::theme_from_visuals;
use annotated_core::input::Instant;
use annotated_core::widget::COMMIT_DELAY;
use annotated_core::{
    AnnotatedWidget, ClickTimer, DrawContext, EventContext, Node, PointerEvent, PromptService,
    View, WIDGET_HEIGHT, Widget,
};
use egui::{CursorIcon, Pos2, Response, Sense, Ui, vec2};
use kurbo::{Point, Vec2};

/// egui adapter for an annotated widget row.
///
/// Pointer interaction is translated into widget pointer events in
/// row-local coordinates. Pending commits are polled every frame, and a
/// repaint is requested while any remain.
pub struct AnnotatedSlider<'a> {
    widget: &'a mut AnnotatedWidget,
    node: &'a mut dyn Node,
    prompt: &'a mut dyn PromptService,
    scale: f64,
    now: Option<Instant>,
}

impl<'a> AnnotatedSlider<'a> {
    pub fn new(
        widget: &'a mut AnnotatedWidget,
        node: &'a mut dyn Node,
        prompt: &'a mut dyn PromptService,
    ) -> Self {
        Self {
            widget,
            node,
            prompt,
            scale: 1.0,
            now: None,
        }
    }

    /// Set the zoom scale used for level-of-detail.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Take the zoom scale from a view.
    pub fn view(self, view: &View) -> Self {
        self.scale(view.scale)
    }

    /// Time the frame is handled at. Defaults to the current time.
    pub fn at(mut self, now: Instant) -> Self {
        self.now = Some(now);
        self
    }

    fn send(&mut self, event: PointerEvent, now: Instant) {
        let mut ctx = EventContext::new(&*self.node, &mut *self.prompt, now);
        self.widget.handle_pointer_event(&event, &mut ctx);
    }
}

fn to_local(pos: Pos2, origin: Pos2) -> Point {
    Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
}

impl egui::Widget for AnnotatedSlider<'_> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let width = ui.available_width();
        let (rect, mut response) =
            ui.allocate_exact_size(vec2(width, WIDGET_HEIGHT as f32), Sense::click_and_drag());
        self.widget.width = Some(rect.width() as f64);

        let now = self.now.unwrap_or_else(Instant::now);
        let old_value = self.widget.value;
        let timer_id = response.id.with("click_timer");
        let mut timer: ClickTimer = ui.data_mut(|d| d.get_temp(timer_id)).unwrap_or_default();
        let pointer = response
            .interact_pointer_pos()
            .or_else(|| ui.input(|i| i.pointer.latest_pos()));

        if let Some(pos) = pointer {
            let position = to_local(pos, rect.min);

            if response.is_pointer_button_down_on() && !timer.is_pressed() {
                timer.press(now);
                self.send(PointerEvent::Down { position }, now);
            }

            if response.dragged() {
                let delta = response.drag_delta();
                if delta != egui::Vec2::ZERO {
                    self.send(
                        PointerEvent::Move {
                            position,
                            delta: Vec2::new(delta.x as f64, delta.y as f64),
                        },
                        now,
                    );
                }
            }

            if response.clicked() || response.drag_stopped() {
                let click_time = timer.release(now);
                self.send(
                    PointerEvent::Up {
                        position,
                        click_time,
                    },
                    now,
                );
            }
        }

        // Press released somewhere we never saw as a click or drag end
        if timer.is_pressed() && !response.is_pointer_button_down_on() {
            timer = ClickTimer::new();
        }
        ui.data_mut(|d| d.insert_temp(timer_id, timer));

        self.widget.poll_commits(now, self.node);
        if !self.widget.commits().is_empty() {
            ui.ctx().request_repaint_after(COMMIT_DELAY);
        }
        if self.widget.value != old_value {
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            let theme = theme_from_visuals(ui.visuals());
            let painter = ui.painter_at(rect);
            let mut surface = EguiSurface::new(&painter, rect.min);
            let ctx = DrawContext::new(&*self.node, &theme, rect.width() as f64)
                .with_row(0.0, rect.height() as f64)
                .with_scale(self.scale);
            self.widget.draw(&mut surface, &ctx);
        }

        response.on_hover_cursor(CursorIcon::ResizeHorizontal)
    }
}
