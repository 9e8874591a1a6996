//! Interfaces the widget needs from the host editor.

use kurbo::Point;
use serde_json::{Map, Value};

/// The node that owns a widget.
pub trait Node {
    /// Property store of the node.
    fn properties(&self) -> &Map<String, Value>;

    /// Write a property.
    fn set_property(&mut self, key: &str, value: Value);

    /// Width of the node, used when the widget has no width of its own.
    fn width(&self) -> f64;

    /// Whether `key` exists in the property store.
    fn has_property(&self, key: &str) -> bool {
        self.properties().contains_key(key)
    }
}

/// Node backed by a plain property map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyNode {
    properties: Map<String, Value>,
    width: f64,
}

impl PropertyNode {
    /// Create a node of the given width with no properties.
    pub fn new(width: f64) -> Self {
        Self {
            properties: Map::new(),
            width,
        }
    }

    /// Add a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Replace the property store.
    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = properties;
        self
    }

    /// Read a numeric property.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(Value::as_f64)
    }
}

impl Node for PropertyNode {
    fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    fn set_property(&mut self, key: &str, value: Value) {
        self.properties.insert(key.to_string(), value);
    }

    fn width(&self) -> f64 {
        self.width
    }
}

/// Request to open the host's text prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    /// Dialog title.
    pub title: String,
    /// Value the text field starts with.
    pub value: f64,
    /// Pointer position of the tap that opened the prompt.
    pub position: Point,
}

impl PromptRequest {
    /// Text the prompt field is seeded with.
    pub fn initial_text(&self) -> String {
        format!("{}", self.value)
    }
}

/// Modal text prompt supplied by the host.
///
/// The host shows the dialog and, on confirmation, hands the entered text
/// back through `Widget::confirm_prompt`.
pub trait PromptService {
    fn prompt(&mut self, request: PromptRequest);
}

/// Prompt service that keeps the most recent request until taken.
#[derive(Debug, Clone, Default)]
pub struct PromptSlot {
    request: Option<PromptRequest>,
}

impl PromptSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending request, if any.
    pub fn pending(&self) -> Option<&PromptRequest> {
        self.request.as_ref()
    }

    /// Take the pending request.
    pub fn take(&mut self) -> Option<PromptRequest> {
        self.request.take()
    }
}

impl PromptService for PromptSlot {
    fn prompt(&mut self, request: PromptRequest) {
        self.request = Some(request);
    }
}
