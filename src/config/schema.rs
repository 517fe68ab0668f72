//! Data types for the authored configuration set.
//!
//! A configuration set is a directory holding:
//! - `connections.yaml`: the external devices and software buttons talk to
//! - `variables.yaml`: Companion custom variables
//! - `parameters.yaml` (optional): per-site overlay of machine addresses and
//!   connection setting overrides
//! - `pages/page*.yaml`: one file per button page
//!
//! Field names follow the YAML authored by operators, not Companion's export
//! schema; [`crate::export`] does that translation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved connection name addressing Companion's built-in actions and feedbacks.
pub const INTERNAL_CONNECTION: &str = "internal";

/// Module placeholder for connections whose device has not been chosen yet.
pub const UNDETERMINED_MODULE: &str = "TBD";

/// Marker authors leave in notes for decisions still pending.
pub const OPEN_QUESTION_MARKER: &str = "OPEN QUESTION";

/// Key/value option or configuration map, in authored order.
pub type Options = IndexMap<String, Value>;

/// Free-form notes: a single string or a list of lines.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Notes {
    Text(String),
    Lines(Vec<Value>),
}

impl Notes {
    /// Notes as individual lines; non-string list entries are rendered as JSON.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Text(text) => vec![text.clone()],
            Self::Lines(lines) => lines
                .iter()
                .map(|line| match line {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        }
    }

    /// Number of lines carrying the open-question marker.
    #[must_use]
    pub fn open_questions(&self) -> usize {
        self.lines()
            .iter()
            .filter(|line| line.contains(OPEN_QUESTION_MARKER))
            .count()
    }
}

// === connections.yaml ===

/// Top level of `connections.yaml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConnectionsDoc {
    /// Required; a document without this section is rejected.
    #[serde(default)]
    pub connections: Option<Vec<ConnectionSpec>>,
}

/// One declared connection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionSpec {
    /// Author-facing name referenced by actions and feedbacks.
    #[serde(default)]
    pub id: String,
    /// Companion module type, or [`UNDETERMINED_MODULE`].
    #[serde(default = "default_module")]
    pub module: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Module configuration using author-facing keys.
    #[serde(default)]
    pub config: Options,
    #[serde(default)]
    pub notes: Option<Notes>,
}

fn default_module() -> String {
    UNDETERMINED_MODULE.to_string()
}

const fn default_true() -> bool {
    true
}

impl ConnectionSpec {
    /// True if this connection waits on a module decision and is not exported.
    #[must_use]
    pub fn is_undetermined(&self) -> bool {
        self.module == UNDETERMINED_MODULE
    }
}

// === variables.yaml ===

/// Top level of `variables.yaml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VariablesDoc {
    #[serde(default)]
    pub custom_variables: Vec<VariableSpec>,
}

/// A Companion custom variable.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VariableSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_variable_value")]
    pub default: Value,
}

fn default_variable_value() -> Value {
    Value::String(String::new())
}

// === parameters.yaml ===

/// Site overlay: where machines live and how connections deviate per site.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParametersDoc {
    /// Machine name to network identity.
    #[serde(default)]
    pub machines: IndexMap<String, Machine>,
    /// Connection id to machine name.
    #[serde(default)]
    pub assignments: IndexMap<String, String>,
    /// Connection id to setting overrides. A `module` key overrides the module type.
    #[serde(default)]
    pub connection_settings: IndexMap<String, Options>,
}

/// Network identity of a machine on the production network.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Machine {
    pub ip: String,
    #[serde(default)]
    pub mac: Option<String>,
}

/// Key in `connection_settings` entries that overrides the module type.
pub const MODULE_OVERRIDE_KEY: &str = "module";

impl ParametersDoc {
    /// Module override for a connection, if the overlay sets one.
    #[must_use]
    pub fn module_override(&self, connection_id: &str) -> Option<&str> {
        self.connection_settings
            .get(connection_id)?
            .get(MODULE_OVERRIDE_KEY)?
            .as_str()
    }

    /// Machine assigned to a connection, if any.
    #[must_use]
    pub fn machine_for(&self, connection_id: &str) -> Option<(&str, Option<&Machine>)> {
        let name = self.assignments.get(connection_id)?;
        Some((name.as_str(), self.machines.get(name)))
    }

    /// Overlay settings for a connection without the module override key.
    #[must_use]
    pub fn settings_for(&self, connection_id: &str) -> Options {
        self.connection_settings
            .get(connection_id)
            .map(|settings| {
                settings
                    .iter()
                    .filter(|(key, _)| key.as_str() != MODULE_OVERRIDE_KEY)
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

// === pages/page*.yaml ===

/// One page file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageDoc {
    #[serde(default)]
    pub page: PageMeta,
    #[serde(default)]
    pub buttons: Vec<ButtonSpec>,
}

/// Page header.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageMeta {
    /// Companion page number (1-based). Zero counts as missing.
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
}

impl PageMeta {
    /// Page number if set and non-zero.
    #[must_use]
    pub fn page_number(&self) -> Option<u32> {
        self.number.filter(|n| *n > 0)
    }
}

/// One button on a page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ButtonSpec {
    /// `[row, col]`, zero-based.
    #[serde(default)]
    pub position: Option<Vec<i64>>,
    #[serde(default)]
    pub style: Option<StyleSpec>,
    #[serde(default)]
    pub actions: ActionSet,
    #[serde(default = "default_step_count")]
    pub step_count: u32,
    #[serde(default)]
    pub step_2_actions: Option<ActionSet>,
    #[serde(default)]
    pub step_2_timeout_ms: Option<u64>,
    /// Accepted for forward compatibility; Companion has no per-step style.
    #[serde(default)]
    pub step_2_style: Option<StyleSpec>,
    #[serde(default)]
    pub feedbacks: Vec<FeedbackSpec>,
    #[serde(default)]
    pub notes: Option<Notes>,
}

const fn default_step_count() -> u32 {
    1
}

impl Default for ButtonSpec {
    fn default() -> Self {
        Self {
            position: None,
            style: None,
            actions: ActionSet::default(),
            step_count: default_step_count(),
            step_2_actions: None,
            step_2_timeout_ms: None,
            step_2_style: None,
            feedbacks: Vec::new(),
            notes: None,
        }
    }
}

impl ButtonSpec {
    /// Position as `(row, col)` when it has exactly two entries.
    #[must_use]
    pub fn grid_position(&self) -> Option<(i64, i64)> {
        match self.position.as_deref() {
            Some([row, col]) => Some((*row, *col)),
            _ => None,
        }
    }

    /// True for buttons with a confirmation step.
    #[must_use]
    pub const fn is_multistep(&self) -> bool {
        self.step_count >= 2
    }

    /// Actions of the confirmation step.
    #[must_use]
    pub fn second_step_actions(&self) -> &[ActionSpec] {
        self.step_2_actions
            .as_ref()
            .map(|set| set.press.as_slice())
            .unwrap_or_default()
    }
}

/// Visual style as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StyleSpec {
    #[serde(default)]
    pub text_top: Option<String>,
    #[serde(default)]
    pub text_bottom: Option<String>,
    #[serde(default)]
    pub font_size: Option<String>,
    #[serde(default)]
    pub color_text: Option<String>,
    #[serde(default)]
    pub color_bg: Option<String>,
}

impl StyleSpec {
    /// True if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text_top.is_none()
            && self.text_bottom.is_none()
            && self.font_size.is_none()
            && self.color_text.is_none()
            && self.color_bg.is_none()
    }
}

/// Actions fired by a button step.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ActionSet {
    #[serde(default)]
    pub press: Vec<ActionSpec>,
}

/// One action as authored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionSpec {
    #[serde(default = "default_connection")]
    pub connection: String,
    /// Symbolic action name.
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub options: Options,
}

/// One feedback as authored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedbackSpec {
    #[serde(default = "default_connection")]
    pub connection: String,
    /// Symbolic feedback name.
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub options: Options,
    #[serde(default)]
    pub style_when_true: Option<StyleSpec>,
    #[serde(default)]
    pub style_when_false: Option<StyleSpec>,
}

fn default_connection() -> String {
    INTERNAL_CONNECTION.to_string()
}

// === Loaded set ===

/// A page document together with the file it came from.
#[derive(Debug, Clone)]
pub struct PageFile {
    /// File name used in validation messages (e.g. `page01-main.yaml`).
    pub source: String,
    pub doc: PageDoc,
}

/// Every document of a configuration set, parsed.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub connections: Vec<ConnectionSpec>,
    pub variables: Vec<VariableSpec>,
    pub parameters: Option<ParametersDoc>,
    pub pages: Vec<PageFile>,
}
