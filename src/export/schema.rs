//! Companion export document (format version 6).
//!
//! Field names and key order match what Companion writes in its own exports,
//! so a generated file diffs cleanly against one exported from the UI.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Options;
use crate::resolve::ResolvedConnection;
use crate::style::FontSize;

/// Top-level export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedExport {
    pub version: u32,
    #[serde(rename = "type")]
    pub export_type: String,
    #[serde(rename = "companionBuild")]
    pub companion_build: String,
    /// Page number (as a string) to page.
    pub pages: IndexMap<String, ResolvedPage>,
    /// Opaque connection identity to connection.
    pub instances: IndexMap<String, ResolvedConnection>,
    pub custom_variables: IndexMap<String, ResolvedVariable>,
}

impl ResolvedExport {
    /// Total number of buttons across all pages.
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.pages.values().map(ResolvedPage::button_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPage {
    pub name: String,
    /// Row (as a string) to column (as a string) to button.
    pub controls: IndexMap<String, IndexMap<String, ResolvedButton>>,
    #[serde(rename = "gridSize")]
    pub grid_size: GridSize,
}

impl ResolvedPage {
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.controls.values().map(IndexMap::len).sum()
    }

    /// Button at a grid position, if one was placed there.
    #[must_use]
    pub fn button_at(&self, row: u32, col: u32) -> Option<&ResolvedButton> {
        self.controls.get(&row.to_string())?.get(&col.to_string())
    }
}

/// Bounds of the button grid, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSize {
    pub min_column: u32,
    pub max_column: u32,
    pub min_row: u32,
    pub max_row: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedButton {
    #[serde(rename = "type")]
    pub control_type: String,
    pub options: ButtonOptions,
    pub style: ButtonStyle,
    pub feedbacks: Vec<ResolvedFeedback>,
    /// Step identity to step, step 1 first.
    pub steps: IndexMap<String, ResolvedStep>,
    #[serde(rename = "localVariables")]
    pub local_variables: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonOptions {
    pub rotary_actions: bool,
    pub step_progression: String,
    /// Only present on multi-step buttons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_auto_progress_timeout: Option<u64>,
}

/// Base style of a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonStyle {
    pub text: String,
    #[serde(rename = "textExpression")]
    pub text_expression: bool,
    pub size: FontSize,
    pub alignment: String,
    pub pngalignment: String,
    pub color: u32,
    pub bgcolor: u32,
    pub show_topbar: String,
    pub png64: Option<String>,
}

/// Partial style applied while a feedback is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Action entity inside a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAction {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub id: String,
    pub definition_id: String,
    pub connection_id: String,
    pub headline: Option<String>,
    pub options: Options,
    pub disabled: bool,
    pub upgrade_index: Option<u32>,
}

/// Feedback entity on a button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFeedback {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub id: String,
    pub definition_id: String,
    pub connection_id: String,
    pub headline: Option<String>,
    pub options: Options,
    pub disabled: bool,
    pub upgrade_index: Option<u32>,
    pub is_inverted: bool,
    pub style: FeedbackStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStep {
    pub action_sets: ActionSets,
    pub options: StepOptions,
}

/// Actions by trigger. Only press actions are ever generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSets {
    pub down: Vec<ResolvedAction>,
    pub up: Vec<ResolvedAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOptions {
    pub run_while_held: Vec<Value>,
    pub name: String,
}

/// Companion custom variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVariable {
    pub description: String,
    pub default_value: Value,
    pub persist_current_value: bool,
    pub sort_order: usize,
}
