//! Drives a widget through a scenario on a synthetic clock.

use crate::scenario::{Scenario, ScenarioEvent};
use annotated_core::input::{Duration, Instant};
use annotated_core::widget::COMMIT_DELAY;
use annotated_core::{
    AnnotatedWidget, DrawContext, EventContext, Node, PointerEvent, PromptSlot,
    PropertyNode, RecordingSurface, Theme, Widget, WidgetStub, make_annotated,
};
use kurbo::{Point, Vec2};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// State after one scenario event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// What happened.
    pub event: String,
    /// Milliseconds since the scenario started.
    pub at_ms: u64,
    /// Widget value after the event.
    pub value: f64,
    /// Commits still waiting.
    pub pending: usize,
    /// Commits that ran after the event.
    pub committed: usize,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub steps: Vec<Step>,
    /// Final widget value.
    pub value: f64,
    /// Final button state.
    pub button: String,
    /// Final node properties.
    pub properties: Map<String, Value>,
    /// Values the widget callback received, in order.
    pub callbacks: Vec<f64>,
    /// Whether a value prompt was left unanswered.
    pub prompt_open: bool,
    /// Draw commands of the final frame.
    pub draw: Vec<String>,
}

struct Replay {
    widget: AnnotatedWidget,
    node: PropertyNode,
    prompt: PromptSlot,
    start: Instant,
    elapsed: Duration,
}

impl Replay {
    fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    fn send(&mut self, event: PointerEvent) {
        let now = self.now();
        let mut ctx = EventContext::new(&self.node, &mut self.prompt, now);
        self.widget.handle_pointer_event(&event, &mut ctx);
    }

    fn apply(&mut self, event: &ScenarioEvent) -> String {
        match event {
            ScenarioEvent::Down { x, y } => {
                self.send(PointerEvent::Down {
                    position: Point::new(*x, *y),
                });
                format!("down ({x}, {y})")
            }
            ScenarioEvent::Move { x, y, dx, dy } => {
                self.send(PointerEvent::Move {
                    position: Point::new(*x, *y),
                    delta: Vec2::new(*dx, *dy),
                });
                format!("move ({x}, {y}) by {dx}")
            }
            ScenarioEvent::Up { x, y, click_ms } => {
                self.send(PointerEvent::Up {
                    position: Point::new(*x, *y),
                    click_time: Duration::from_millis(*click_ms),
                });
                format!("up ({x}, {y}) after {click_ms}ms")
            }
            ScenarioEvent::Prompt(text) => match self.prompt.take() {
                Some(request) => {
                    match self.widget.confirm_prompt(&request, text, &mut self.node) {
                        Ok(value) => format!("prompt {text:?} -> {value}"),
                        Err(e) => format!("prompt {text:?} rejected: {e}"),
                    }
                }
                None => {
                    log::warn!("Prompt text {:?} with no prompt open", text);
                    format!("prompt {text:?} ignored")
                }
            },
            ScenarioEvent::WaitMs(ms) => {
                self.elapsed += Duration::from_millis(*ms);
                format!("wait {ms}ms")
            }
        }
    }

    fn step(&mut self, event: String) -> Step {
        let now = self.now();
        let committed = self.widget.poll_commits(now, &mut self.node);
        Step {
            event,
            at_ms: u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
            value: self.widget.value,
            pending: self.widget.commits().len(),
            committed,
        }
    }
}

/// Replay `scenario` and report what happened.
///
/// Events take no time; only `wait_ms` advances the clock. Commits still
/// pending after the last event are flushed before the final frame is drawn.
pub fn run(scenario: Scenario) -> Report {
    let callbacks = Rc::new(RefCell::new(Vec::new()));
    let sink = callbacks.clone();

    let setup = scenario.widget;
    let mut stub = WidgetStub::new(setup.name)
        .with_value(setup.value)
        .with_options(setup.options)
        .with_disabled(setup.disabled)
        .with_callback(move |value, _node, _pos| sink.borrow_mut().push(value));
    stub.label = setup.label;
    stub.width = setup.width;

    let mut replay = Replay {
        widget: make_annotated(stub, scenario.descriptor),
        node: PropertyNode::new(scenario.node.width).with_properties(scenario.node.properties),
        prompt: PromptSlot::new(),
        start: Instant::now(),
        elapsed: Duration::ZERO,
    };

    let mut steps = Vec::with_capacity(scenario.events.len() + 1);
    for event in &scenario.events {
        let description = replay.apply(event);
        log::info!("{}", description);
        steps.push(replay.step(description));
    }
    if !replay.widget.commits().is_empty() {
        replay.elapsed += COMMIT_DELAY;
        steps.push(replay.step("flush".to_string()));
    }

    let theme = Theme::default();
    let width = replay.widget.width.unwrap_or_else(|| replay.node.width());
    let ctx = DrawContext::new(&replay.node, &theme, width).with_scale(scenario.scale);
    let mut surface = RecordingSurface::new();
    replay.widget.draw(&mut surface, &ctx);

    let callbacks = callbacks.borrow().clone();
    Report {
        steps,
        value: replay.widget.value,
        button: replay.widget.button_state().name().to_string(),
        properties: replay.node.properties().clone(),
        callbacks,
        prompt_open: replay.prompt.pending().is_some(),
        draw: surface
            .take_commands()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(
                f,
                "[{:>5}ms] {:<32} value={} pending={} committed={}",
                step.at_ms, step.event, step.value, step.pending, step.committed
            )?;
        }
        writeln!(f, "value: {}", self.value)?;
        writeln!(f, "button: {}", self.button)?;
        writeln!(f, "properties: {}", Value::Object(self.properties.clone()))?;
        writeln!(f, "callbacks: {:?}", self.callbacks)?;
        if self.prompt_open {
            writeln!(f, "prompt: open")?;
        }
        writeln!(f, "draw:")?;
        for command in &self.draw {
            writeln!(f, "  {command}")?;
        }
        Ok(())
    }
}
