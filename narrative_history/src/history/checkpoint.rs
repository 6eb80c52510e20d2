//! Step checkpoints - the full restorable state after one narrative step.

use canvas_memory::{Canvas, CanvasSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for checkpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckpointId(pub Uuid);

impl CheckpointId {
    /// Create a new random checkpoint ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CheckpointId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position in the script: a label and the step index inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepPointer {
    pub label: String,
    pub index: u32,
}

impl StepPointer {
    /// Label of the pointer every session starts from.
    pub const START_LABEL: &'static str = "start";

    pub fn new(label: impl Into<String>, index: u32) -> Self {
        Self {
            label: label.into(),
            index,
        }
    }

    /// The pointer before any step has run.
    pub fn start() -> Self {
        Self::new(Self::START_LABEL, 0)
    }

    /// The next step in the same label.
    pub fn next(&self) -> Self {
        Self::new(self.label.clone(), self.index + 1)
    }
}

impl Default for StepPointer {
    fn default() -> Self {
        Self::start()
    }
}

impl std::fmt::Display for StepPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.label, self.index)
    }
}

/// Value bound to a narrative variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<VariableValue>),
    Map(BTreeMap<String, VariableValue>),
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        VariableValue::Bool(value)
    }
}

impl From<i64> for VariableValue {
    fn from(value: i64) -> Self {
        VariableValue::Int(value)
    }
}

impl From<f64> for VariableValue {
    fn from(value: f64) -> Self {
        VariableValue::Float(value)
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::Text(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::Text(value)
    }
}

/// Narrative variable bindings, sorted by name.
pub type Variables = BTreeMap<String, VariableValue>;

/// A line of dialogue currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialogue {
    /// Speaking character, `None` for narration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    pub text: String,
}

impl Dialogue {
    pub fn narration(text: impl Into<String>) -> Self {
        Self {
            character: None,
            text: text.into(),
        }
    }

    pub fn spoken(character: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            character: Some(character.into()),
            text: text.into(),
        }
    }
}

/// A menu option offered to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    /// Label jumped to when the option is picked.
    pub label: String,
}

/// Open dialogue and pending choices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DialogueState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<Dialogue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

/// Interpreter-level state reported by the narrative engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NarrativeState {
    pub step: StepPointer,
    #[serde(default)]
    pub variables: Variables,
    #[serde(default)]
    pub dialogue: DialogueState,
}

/// Everything needed to restore the session as it was after one step.
///
/// A checkpoint never refers to another checkpoint; restoring it needs
/// nothing else from the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    #[serde(default)]
    pub id: CheckpointId,
    pub step: StepPointer,
    pub canvas: CanvasSnapshot,
    #[serde(default)]
    pub variables: Variables,
    #[serde(default)]
    pub dialogue: DialogueState,
}

impl Checkpoint {
    /// Create a checkpoint from its parts.
    pub fn new(step: StepPointer, canvas: CanvasSnapshot) -> Self {
        Self {
            id: CheckpointId::new(),
            step,
            canvas,
            variables: Variables::new(),
            dialogue: DialogueState::default(),
        }
    }

    /// The checkpoint of a session that has not run any step yet.
    pub fn initial() -> Self {
        Self::new(StepPointer::start(), CanvasSnapshot::new())
    }

    /// Capture the live canvas together with the engine's state.
    pub fn capture(canvas: &Canvas, state: &NarrativeState) -> Self {
        Self {
            id: CheckpointId::new(),
            step: state.step.clone(),
            canvas: canvas.snapshot(),
            variables: state.variables.clone(),
            dialogue: state.dialogue.clone(),
        }
    }

    /// Set a variable binding.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<VariableValue>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Set the open dialogue.
    pub fn with_dialogue(mut self, dialogue: Dialogue) -> Self {
        self.dialogue.current = Some(dialogue);
        self
    }

    /// The interpreter-level part of this checkpoint.
    pub fn narrative_state(&self) -> NarrativeState {
        NarrativeState {
            step: self.step.clone(),
            variables: self.variables.clone(),
            dialogue: self.dialogue.clone(),
        }
    }
}
