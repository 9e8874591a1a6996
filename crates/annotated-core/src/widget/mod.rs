//! The annotated numeric widget.
//!
//! A widget is built once by [`make_annotated`](crate::factory::make_annotated)
//! and then driven by the host through the [`Widget`] trait:
//! - `draw` paints it onto a [`Surface`]
//! - `handle_pointer_event` turns pointer input into value changes
//! - `compute_size` reports the preferred row size
//!
//! Value changes are not pushed to the node right away. Each change schedules
//! a commit on the widget's [`CommitQueue`], which the host drains with
//! [`AnnotatedWidget::poll_commits`].

mod commit;
mod draw;
mod interaction;

pub use commit::{COMMIT_DELAY, CommitHandle, CommitQueue};
pub use interaction::{
    BUTTON_HIT_LEFT, BUTTON_HIT_RIGHT, TAP_THRESHOLD, allows_drag, in_button_hit_box, zone_delta,
};

use crate::button::ButtonState;
use crate::factory::InputDescriptor;
use crate::error::ParseResult;
use crate::host::{Node, PromptRequest, PromptService};
use crate::input::{Instant, PointerEvent};
use crate::options::WidgetOptions;
use crate::surface::{Surface, Theme};
use crate::view::{DETAIL_SCALE_THRESHOLD, View};
use kurbo::{Point, Size};
use std::fmt;

/// Discriminator the host uses to route draw and pointer dispatch.
pub const WIDGET_TYPE: &str = "ANNOTATED";

/// Preferred row height.
pub const WIDGET_HEIGHT: f64 = 20.0;

/// Horizontal inset of the widget background inside the node.
pub const MARGIN: f64 = 15.0;

/// Caller hook run on commit with `(value, node, position)`.
pub type ValueCallback = Box<dyn FnMut(f64, &mut dyn Node, Point)>;

/// Per-instance annotation with `(value, available_width)`.
pub type AnnotationFn = Box<dyn Fn(f64, f64) -> Option<String>>;

/// Capabilities the host needs from a widget.
pub trait Widget {
    /// Discriminator type string.
    fn widget_type(&self) -> &'static str;

    /// Paint the widget.
    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext<'_>);

    /// Handle a pointer event. Returns whether the event was consumed.
    fn handle_pointer_event(&mut self, event: &PointerEvent, ctx: &mut EventContext<'_>) -> bool;

    /// Preferred size for a given width.
    fn compute_size(&self, width: f64) -> Size;

    /// Apply text confirmed in the prompt opened for `request`.
    ///
    /// The text must be a plain number. Accepted values are clamped and
    /// committed immediately; rejected text leaves the widget untouched.
    fn confirm_prompt(
        &mut self,
        request: &PromptRequest,
        text: &str,
        node: &mut dyn Node,
    ) -> ParseResult<f64>;
}

/// Everything a draw call needs from the host.
pub struct DrawContext<'a> {
    /// Owning node.
    pub node: &'a dyn Node,
    /// Widget width in pixels.
    pub width: f64,
    /// Top of the widget row.
    pub y: f64,
    /// Height of the widget row.
    pub height: f64,
    /// Colors.
    pub theme: &'a Theme,
    /// Current view zoom.
    pub scale: f64,
}

impl<'a> DrawContext<'a> {
    /// Create a context for a row at `y = 0` with the preferred height at 100% zoom.
    pub fn new(node: &'a dyn Node, theme: &'a Theme, width: f64) -> Self {
        Self {
            node,
            width,
            y: 0.0,
            height: WIDGET_HEIGHT,
            theme,
            scale: 1.0,
        }
    }

    /// Set the row position and height.
    pub fn with_row(mut self, y: f64, height: f64) -> Self {
        self.y = y;
        self.height = height;
        self
    }

    /// Set the zoom scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Take the zoom scale from a view.
    pub fn with_view(self, view: &View) -> Self {
        self.with_scale(view.scale)
    }

    /// Whether text and icons are drawn.
    pub fn shows_detail(&self) -> bool {
        self.scale > DETAIL_SCALE_THRESHOLD
    }
}

/// Everything a pointer event needs from the host.
pub struct EventContext<'a> {
    /// Owning node.
    pub node: &'a dyn Node,
    /// Text prompt used for tap-to-edit.
    pub prompt: &'a mut dyn PromptService,
    /// Time the event is handled at; commits are scheduled relative to it.
    pub now: Instant,
}

impl<'a> EventContext<'a> {
    pub fn new(node: &'a dyn Node, prompt: &'a mut dyn PromptService, now: Instant) -> Self {
        Self { node, prompt, now }
    }
}

/// Numeric slider with label, unit, per-value annotation and reset/disable button.
pub struct AnnotatedWidget {
    /// Property name of the input.
    pub name: String,
    /// Display label; `name` is shown when unset.
    pub label: Option<String>,
    /// Current value.
    pub value: f64,
    /// Merged options.
    pub options: WidgetOptions,
    /// Hides the chevrons and outline.
    pub disabled: bool,
    /// Explicit width; the node width is used when unset.
    pub width: Option<f64>,
    /// Annotation override; the options table is used when unset.
    pub annotation: Option<AnnotationFn>,
    config: InputDescriptor,
    callback_orig: Option<ValueCallback>,
    commits: CommitQueue,
}

impl AnnotatedWidget {
    pub(crate) fn from_parts(
        name: String,
        label: Option<String>,
        value: f64,
        options: WidgetOptions,
        config: InputDescriptor,
        callback_orig: Option<ValueCallback>,
    ) -> Self {
        Self {
            name,
            label,
            value,
            options,
            disabled: false,
            width: None,
            annotation: None,
            config,
            callback_orig,
            commits: CommitQueue::new(),
        }
    }

    /// Text shown as the label.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Descriptor the widget was built from.
    pub fn config(&self) -> &InputDescriptor {
        &self.config
    }

    /// Current button state.
    pub fn button_state(&self) -> ButtonState {
        ButtonState::evaluate(self.value, &self.options)
    }

    /// Value formatted with the configured precision.
    pub fn formatted_value(&self) -> String {
        self.options.format_value(self.value)
    }

    /// Annotation for the current value given the free horizontal space.
    pub fn annotation_text(&self, free_width: f64) -> Option<String> {
        let text = match &self.annotation {
            Some(annotate) => annotate(self.value, free_width),
            None => self
                .options
                .annotation
                .as_ref()
                .and_then(|table| table.get(self.value))
                .map(str::to_string),
        };
        text.filter(|text| !text.is_empty())
    }

    /// Set a per-instance annotation function.
    pub fn set_annotation<F>(&mut self, annotate: F)
    where
        F: Fn(f64, f64) -> Option<String> + 'static,
    {
        self.annotation = Some(Box::new(annotate));
    }

    /// Whether a caller callback was supplied.
    pub fn has_callback(&self) -> bool {
        self.callback_orig.is_some()
    }

    /// Pending commits.
    pub fn commits(&self) -> &CommitQueue {
        &self.commits
    }

    /// Cancel a pending commit.
    pub fn cancel_commit(&mut self, handle: CommitHandle) -> bool {
        self.commits.cancel(handle)
    }

    /// Width used for hit testing.
    fn effective_width(&self, node: &dyn Node) -> f64 {
        self.width.unwrap_or_else(|| node.width())
    }
}

impl fmt::Debug for AnnotatedWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotatedWidget")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("value", &self.value)
            .field("options", &self.options)
            .field("disabled", &self.disabled)
            .field("width", &self.width)
            .field("annotation", &self.annotation.is_some())
            .field("callback", &self.callback_orig.is_some())
            .field("pending_commits", &self.commits.len())
            .finish()
    }
}

impl Widget for AnnotatedWidget {
    fn widget_type(&self) -> &'static str {
        WIDGET_TYPE
    }

    fn draw(&self, surface: &mut dyn Surface, ctx: &DrawContext<'_>) {
        draw::paint(self, surface, ctx);
    }

    fn handle_pointer_event(&mut self, event: &PointerEvent, ctx: &mut EventContext<'_>) -> bool {
        self.on_pointer(event, ctx)
    }

    fn compute_size(&self, width: f64) -> Size {
        Size::new(width, WIDGET_HEIGHT)
    }

    fn confirm_prompt(
        &mut self,
        request: &PromptRequest,
        text: &str,
        node: &mut dyn Node,
    ) -> ParseResult<f64> {
        self.on_prompt_confirmed(request, text, node)
    }
}
