//! Builds annotated widgets from input descriptors.

use crate::host::Node;
use crate::options::WidgetOptions;
use crate::widget::{AnnotatedWidget, ValueCallback, WIDGET_TYPE};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Input descriptor as the host declares it: `["FLOAT", { ...options }]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputDescriptor(pub String, #[serde(default)] pub WidgetOptions);

impl InputDescriptor {
    pub fn new(type_name: impl Into<String>, options: WidgetOptions) -> Self {
        Self(type_name.into(), options)
    }

    /// Declared input type, e.g. `FLOAT`.
    pub fn type_name(&self) -> &str {
        &self.0
    }

    /// Options declared with the input.
    pub fn options(&self) -> &WidgetOptions {
        &self.1
    }
}

/// Generic numeric widget the host creates before it is made annotated.
#[derive(Default)]
pub struct WidgetStub {
    pub name: String,
    pub label: Option<String>,
    pub value: f64,
    pub options: WidgetOptions,
    pub disabled: bool,
    pub width: Option<f64>,
    pub callback: Option<ValueCallback>,
}

impl WidgetStub {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Widget-level options; these win over the descriptor's.
    pub fn with_options(mut self, options: WidgetOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Hook run when a committed value reaches the widget callback.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f64, &mut dyn Node, Point) + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }
}

/// Turn a stub into an annotated widget.
///
/// Widget options are merged over the descriptor's, and the stub callback is
/// kept as the original callback the commit pipeline wraps.
pub fn make_annotated(stub: WidgetStub, descriptor: InputDescriptor) -> AnnotatedWidget {
    let options = stub.options.merged_over(descriptor.options());
    let mut widget = AnnotatedWidget::from_parts(
        stub.name,
        stub.label,
        stub.value,
        options,
        descriptor,
        stub.callback,
    );
    widget.disabled = stub.disabled;
    widget.width = stub.width;

    log::debug!(
        "Built {} widget {:?} for {} input",
        WIDGET_TYPE,
        widget.name,
        widget.config().type_name()
    );
    widget
}
