//! Scenario files for the replay runner.

use annotated_core::{InputDescriptor, WidgetOptions};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

/// Scenario loading errors.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for scenario loading.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// A scripted widget session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Input descriptor the widget is built for.
    #[serde(default)]
    pub descriptor: InputDescriptor,
    pub widget: WidgetSetup,
    #[serde(default)]
    pub node: NodeSetup,
    /// View zoom used when drawing the final frame.
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

fn default_scale() -> f64 {
    1.0
}

/// Widget fields supplied by the host before the widget is made annotated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSetup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: f64,
    pub options: WidgetOptions,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// The owning node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSetup {
    pub width: f64,
    pub properties: Map<String, Value>,
}

impl Default for NodeSetup {
    fn default() -> Self {
        Self {
            width: 200.0,
            properties: Map::new(),
        }
    }
}

/// One scripted step. Coordinates are node-local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioEvent {
    Down {
        x: f64,
        #[serde(default)]
        y: f64,
    },
    Move {
        x: f64,
        #[serde(default)]
        y: f64,
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    Up {
        x: f64,
        #[serde(default)]
        y: f64,
        click_ms: u64,
    },
    /// Text typed into the open value prompt.
    Prompt(String),
    /// Advance the clock.
    WaitMs(u64),
}

impl Scenario {
    /// Parse a scenario from JSON text.
    pub fn from_json(json: &str) -> ScenarioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scenario file.
    pub fn load(path: impl AsRef<Path>) -> ScenarioResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
