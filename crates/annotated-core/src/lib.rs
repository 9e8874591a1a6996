//! Annotated Core Library
//!
//! Platform-agnostic annotated numeric widget for node-graph editors: a
//! slider row with label, value, unit, per-value annotation and a
//! reset/disable button, driven by host pointer events and painted onto a
//! host-supplied surface.

pub mod button;
pub mod error;
pub mod factory;
pub mod host;
pub mod input;
pub mod options;
pub mod surface;
pub mod view;
pub mod widget;

pub use button::ButtonState;
pub use error::{ValueParseError, parse_value};
pub use factory::{InputDescriptor, WidgetStub, make_annotated};
pub use host::{Node, PromptRequest, PromptService, PromptSlot, PropertyNode};
pub use input::{ClickTimer, PointerEvent};
pub use options::{AnnotationTable, WidgetOptions};
pub use surface::{DrawCommand, Font, FontFamily, RecordingSurface, Surface, TextAlign, Theme};
pub use view::View;
pub use widget::{
    AnnotatedWidget, CommitHandle, CommitQueue, DrawContext, EventContext, WIDGET_HEIGHT,
    WIDGET_TYPE, Widget,
};
