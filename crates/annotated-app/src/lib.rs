//! Headless replay of annotated widget scenarios.
//!
//! A scenario names an input descriptor, the widget and node it lives on,
//! and a script of pointer events, prompt answers and waits. [`replay::run`]
//! drives a real widget through it and reports every step plus the final
//! frame's draw commands.

pub mod replay;
pub mod scenario;

pub use replay::{Report, Step, run};
pub use scenario::{NodeSetup, Scenario, ScenarioError, ScenarioEvent, ScenarioResult, WidgetSetup};
