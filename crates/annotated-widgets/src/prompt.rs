//! Tap-to-edit value dialog.

use annotated_core::{AnnotatedWidget, Node, PromptRequest, PromptService, Widget};
use egui::{Context, Key, Window};

#[derive(Debug, Clone)]
struct OpenPrompt {
    request: PromptRequest,
    text: String,
    error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptAction {
    Confirm,
    Cancel,
}

/// Modal text prompt shown as an egui window.
///
/// The widget opens it through [`PromptService`]; the host calls
/// [`ValuePrompt::show`] every frame until it closes.
#[derive(Debug, Clone, Default)]
pub struct ValuePrompt {
    open: Option<OpenPrompt>,
}

impl ValuePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the dialog is showing.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Current field text.
    pub fn text(&self) -> Option<&str> {
        self.open.as_ref().map(|open| open.text.as_str())
    }

    /// Replace the field text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if let Some(open) = self.open.as_mut() {
            open.text = text.into();
        }
    }

    /// Error shown for the last rejected entry.
    pub fn error(&self) -> Option<&str> {
        self.open.as_ref().and_then(|open| open.error.as_deref())
    }

    /// Close without applying anything.
    pub fn cancel(&mut self) {
        if self.open.take().is_some() {
            log::debug!("Value prompt cancelled");
        }
    }

    /// Apply the field text to `widget`.
    ///
    /// On success the dialog closes and the committed value is returned.
    /// Rejected text keeps the dialog open with an error message.
    pub fn confirm(&mut self, widget: &mut AnnotatedWidget, node: &mut dyn Node) -> Option<f64> {
        let open = self.open.as_mut()?;
        match widget.confirm_prompt(&open.request, &open.text, node) {
            Ok(value) => {
                self.open = None;
                Some(value)
            }
            Err(e) => {
                open.error = Some(e.to_string());
                None
            }
        }
    }

    /// Show the dialog if open. Returns the committed value once confirmed.
    pub fn show(
        &mut self,
        ctx: &Context,
        widget: &mut AnnotatedWidget,
        node: &mut dyn Node,
    ) -> Option<f64> {
        let open = self.open.as_mut()?;
        let mut action = None;

        Window::new(open.request.title.clone())
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let edit = ui.text_edit_singleline(&mut open.text);
                if edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    action = Some(PromptAction::Confirm);
                }
                if let Some(error) = &open.error {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        action = Some(PromptAction::Confirm);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(PromptAction::Cancel);
                    }
                });
            });

        match action {
            Some(PromptAction::Confirm) => self.confirm(widget, node),
            Some(PromptAction::Cancel) => {
                self.cancel();
                None
            }
            None => None,
        }
    }
}

impl PromptService for ValuePrompt {
    fn prompt(&mut self, request: PromptRequest) {
        let text = request.initial_text();
        self.open = Some(OpenPrompt {
            request,
            text,
            error: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annotated_core::{InputDescriptor, PropertyNode, WidgetOptions, WidgetStub, make_annotated};
    use kurbo::Point;

    fn widget() -> AnnotatedWidget {
        make_annotated(
            WidgetStub::new("gain").with_value(2.0),
            InputDescriptor::new(
                "FLOAT",
                WidgetOptions::new()
                    .with_range(0.0, 10.0)
                    .with_property("gain"),
            ),
        )
    }

    fn request(value: f64) -> PromptRequest {
        PromptRequest {
            title: "Value".to_string(),
            value,
            position: Point::new(100.0, 10.0),
        }
    }

    #[test]
    fn test_prompt_seeds_text() {
        let mut prompt = ValuePrompt::new();
        assert!(!prompt.is_open());
        prompt.prompt(request(2.0));
        assert!(prompt.is_open());
        assert_eq!(prompt.text(), Some("2"));
    }

    #[test]
    fn test_confirm_commits_and_closes() {
        let mut widget = widget();
        let mut node = PropertyNode::new(200.0).with_property("gain", 2.0);
        let mut prompt = ValuePrompt::new();
        prompt.prompt(request(2.0));
        prompt.set_text("12");

        assert_eq!(prompt.confirm(&mut widget, &mut node), Some(10.0));
        assert!(!prompt.is_open());
        assert_eq!(node.number("gain"), Some(10.0));
    }

    #[test]
    fn test_rejected_text_keeps_dialog_open() {
        let mut widget = widget();
        let mut node = PropertyNode::new(200.0).with_property("gain", 2.0);
        let mut prompt = ValuePrompt::new();
        prompt.prompt(request(2.0));
        prompt.set_text("abc");

        assert_eq!(prompt.confirm(&mut widget, &mut node), None);
        assert!(prompt.is_open());
        assert!(prompt.error().is_some());
        assert!((widget.value - 2.0).abs() < f64::EPSILON);
        assert_eq!(node.number("gain"), Some(2.0));
    }

    #[test]
    fn test_cancel_leaves_value() {
        let mut widget = widget();
        let mut prompt = ValuePrompt::new();
        prompt.prompt(request(2.0));
        prompt.cancel();
        assert!(!prompt.is_open());
        assert!((widget.value - 2.0).abs() < f64::EPSILON);
        let mut node = PropertyNode::new(200.0);
        assert_eq!(prompt.confirm(&mut widget, &mut node), None);
    }

    #[test]
    fn test_show_without_input_stays_open() {
        let mut widget = widget();
        let mut node = PropertyNode::new(200.0);
        let mut prompt = ValuePrompt::new();
        prompt.prompt(request(2.0));

        let ctx = Context::default();
        let mut result = Some(0.0);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            result = prompt.show(ctx, &mut widget, &mut node);
        });
        assert_eq!(result, None);
        assert!(prompt.is_open());
    }
}
