//! Pointer handling: drag, nudge, button and tap-to-edit.

use super::{AnnotatedWidget, EventContext, MARGIN};
use crate::error::{ParseResult, parse_value};
use crate::host::{Node, PromptRequest, PromptService};
use crate::input::{Duration, PointerEvent};
use kurbo::Point;

/// Longest press that still counts as a tap.
pub const TAP_THRESHOLD: Duration = Duration::from_millis(200);

/// Button hit-box edges, measured left from `width - MARGIN`.
pub const BUTTON_HIT_LEFT: f64 = 34.0;
pub const BUTTON_HIT_RIGHT: f64 = 18.0;

const LEFT_ZONE: f64 = 40.0;
const RIGHT_ZONE: f64 = 48.0;
const DRAG_SLACK: f64 = 3.0;
const STEP_FACTOR: f64 = 0.1;

const PROMPT_TITLE: &str = "Value";

/// Direction of the zone under `x`: -1 left chevron, +1 right chevron, 0 middle.
pub fn zone_delta(x: f64, width: f64) -> f64 {
    if x < LEFT_ZONE {
        -1.0
    } else if x > width - RIGHT_ZONE {
        1.0
    } else {
        0.0
    }
}

/// Whether a move at `x` drags the value.
///
/// Moves over a chevron zone are locked while the pointer stays within the
/// widget bounds.
pub fn allows_drag(x: f64, width: f64) -> bool {
    let inside = x > -DRAG_SLACK && x < width + DRAG_SLACK;
    zone_delta(x, width) == 0.0 || !inside
}

/// Whether `x` is over the reset/disable glyph.
pub fn in_button_hit_box(x: f64, width: f64) -> bool {
    x > width - MARGIN - BUTTON_HIT_LEFT && x < width - MARGIN - BUTTON_HIT_RIGHT
}

impl AnnotatedWidget {
    pub(super) fn on_pointer(&mut self, event: &PointerEvent, ctx: &mut EventContext<'_>) -> bool {
        let width = self.effective_width(ctx.node);
        let position = event.position();
        let delta = zone_delta(position.x, width);
        let old_value = self.value;
        let step = self.options.step();

        log::trace!(
            "{} on {:?} at ({:.1}, {:.1})",
            event.kind(),
            self.name,
            position.x,
            position.y
        );

        match *event {
            PointerEvent::Move { delta: movement, .. } => {
                if allows_drag(position.x, width) {
                    if movement.x != 0.0 {
                        self.value += movement.x * STEP_FACTOR * step;
                    }
                    self.value = self.options.clamp(self.value);
                }
            }
            PointerEvent::Down { .. } => {
                if in_button_hit_box(position.x, width) {
                    if let Some(target) = self.button_state().target(&self.options) {
                        self.value = self.options.clamp(target);
                    }
                } else {
                    self.value += delta * STEP_FACTOR * step;
                    self.value = self.options.clamp(self.value);
                }
            }
            PointerEvent::Up { click_time, .. } => {
                if click_time < TAP_THRESHOLD && delta == 0.0 {
                    self.open_prompt(position, ctx.prompt);
                }
            }
        }

        if self.value != old_value {
            self.schedule_commit(ctx.now, position);
        }
        true
    }

    fn open_prompt(&self, position: Point, prompt: &mut dyn PromptService) {
        log::debug!("Opening value prompt for {:?}", self.name);
        prompt.prompt(PromptRequest {
            title: PROMPT_TITLE.to_string(),
            value: self.value,
            position,
        });
    }

    pub(super) fn on_prompt_confirmed(
        &mut self,
        request: &PromptRequest,
        text: &str,
        node: &mut dyn Node,
    ) -> ParseResult<f64> {
        let value = match parse_value(text) {
            Ok(value) => self.options.clamp(value),
            Err(e) => {
                log::warn!("Rejected value for {:?}: {}", self.name, e);
                return Err(e);
            }
        };
        self.commit(value, node, request.position);
        Ok(value)
    }
}
