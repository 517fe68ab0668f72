//! Static checks over a loaded configuration set.
//!
//! Findings come in three severities. Errors always block generation,
//! warnings block only in strict mode, and notes never do. Nothing here
//! touches the module registry: module-specific option values are not
//! checked.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{
    ActionSpec, ButtonSpec, ConnectionSpec, PageFile, ParametersDoc, Project, StyleSpec,
    INTERNAL_CONNECTION,
};
use crate::error::{CompileError, Result};
use crate::export::{GRID_COLS, GRID_ROWS};
use crate::style::{looks_like_hex_color, FONT_SIZE_TOKENS};

/// Source name used for connection findings.
pub const CONNECTIONS_SOURCE: &str = "connections.yaml";
/// Source name used for overlay findings.
pub const PARAMETERS_SOURCE: &str = "parameters.yaml";

/// Marker for an address nobody has filled in yet.
const PLACEHOLDER_ADDRESS: &str = "XXX";

/// Config keys that may carry a connection's address.
const ADDRESS_KEYS: [&str; 2] = ["host", "ip"];

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks generation.
    Error,
    /// Blocks generation in strict mode only.
    Warning,
    /// Informational.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "ERROR",
            Self::Warning => "WARN",
            Self::Info => "INFO",
        })
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// File the finding refers to, e.g. `page01-main.yaml`.
    pub source: String,
    pub message: String,
    pub severity: Severity,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

/// Every finding of one validation run, in discovery order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub summary: ValidationSummary,
}

/// Counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, source.into(), message.into());
    }

    pub fn add_warning(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warning, source.into(), message.into());
    }

    pub fn add_note(&mut self, source: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Info, source.into(), message.into());
    }

    fn push(&mut self, severity: Severity, source: String, message: String) {
        debug!(%severity, %source, %message, "Validation finding");
        match severity {
            Severity::Error => self.summary.error_count += 1,
            Severity::Warning => self.summary.warning_count += 1,
            Severity::Info => self.summary.info_count += 1,
        }
        self.issues.push(ValidationIssue {
            source,
            message,
            severity,
        });
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.summary.error_count > 0
    }

    #[must_use]
    pub const fn has_warnings(&self) -> bool {
        self.summary.warning_count > 0
    }

    /// Findings of one severity, in discovery order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    #[must_use]
    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.with_severity(Severity::Error).collect()
    }

    #[must_use]
    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.with_severity(Severity::Warning).collect()
    }

    #[must_use]
    pub fn notes(&self) -> Vec<&ValidationIssue> {
        self.with_severity(Severity::Info).collect()
    }

    /// True if generation must not proceed.
    #[must_use]
    pub const fn blocks_generation(&self, strict: bool) -> bool {
        self.has_errors() || (strict && self.has_warnings())
    }

    /// Turn the report into the error that stops generation, if any.
    ///
    /// # Errors
    ///
    /// [`CompileError::ValidationFailed`] when there are errors, or
    /// [`CompileError::StrictWarnings`] when `strict` and there are warnings.
    pub fn gate(&self, strict: bool) -> Result<()> {
        if self.has_errors() {
            return Err(CompileError::ValidationFailed {
                errors: self.summary.error_count,
            });
        }
        if strict && self.has_warnings() {
            return Err(CompileError::StrictWarnings {
                warnings: self.summary.warning_count,
            });
        }
        Ok(())
    }
}

/// Validate a whole configuration set.
#[instrument(skip_all, fields(pages = project.pages.len(), connections = project.connections.len()))]
#[must_use]
pub fn validate_project(project: &Project) -> ValidationReport {
    let mut report = ValidationReport::new();

    let mut known: HashSet<&str> = project.connections.iter().map(|c| c.id.as_str()).collect();
    known.insert(INTERNAL_CONNECTION);

    validate_connections(&project.connections, &mut report);
    if let Some(params) = &project.parameters {
        validate_parameters(params, &project.connections, &mut report);
    }
    for page in &project.pages {
        validate_page(page, &known, &mut report);
    }

    debug!(
        errors = report.summary.error_count,
        warnings = report.summary.warning_count,
        notes = report.summary.info_count,
        "Validation complete"
    );
    report
}

/// Connection-level checks: duplicates, placeholder addresses, open questions.
pub fn validate_connections(connections: &[ConnectionSpec], report: &mut ValidationReport) {
    let mut seen = HashSet::new();
    for conn in connections {
        if !seen.insert(conn.id.as_str()) {
            report.add_error(
                CONNECTIONS_SOURCE,
                format!("duplicate connection id '{}'", conn.id),
            );
        }

        let placeholder = ADDRESS_KEYS
            .iter()
            .filter_map(|key| conn.config.get(*key))
            .map(value_text)
            .find(|address| address.contains(PLACEHOLDER_ADDRESS));
        if let Some(address) = placeholder {
            report.add_warning(
                CONNECTIONS_SOURCE,
                format!("'{}' has placeholder IP ({address})", conn.id),
            );
        }

        let open = conn.notes.as_ref().map_or(0, |notes| notes.open_questions());
        if open > 0 {
            report.add_warning(
                CONNECTIONS_SOURCE,
                format!("'{}' has {open} OPEN QUESTION(s)", conn.id),
            );
        }
    }
}

/// Overlay checks: module divergence and dangling references.
pub fn validate_parameters(
    params: &ParametersDoc,
    connections: &[ConnectionSpec],
    report: &mut ValidationReport,
) {
    let declared = |id: &str| connections.iter().find(|c| c.id == id);

    for (conn_id, machine) in &params.assignments {
        if declared(conn_id).is_none() {
            report.add_warning(
                PARAMETERS_SOURCE,
                format!("assignment for unknown connection '{conn_id}'"),
            );
        }
        if !params.machines.contains_key(machine) {
            report.add_warning(
                PARAMETERS_SOURCE,
                format!("'{conn_id}' is assigned to unknown machine '{machine}'"),
            );
        }
    }

    for conn_id in params.connection_settings.keys() {
        let Some(conn) = declared(conn_id) else {
            report.add_warning(
                PARAMETERS_SOURCE,
                format!("settings for unknown connection '{conn_id}'"),
            );
            continue;
        };
        if let Some(module) = params.module_override(conn_id) {
            if !conn.is_undetermined() && module != conn.module {
                report.add_warning(
                    PARAMETERS_SOURCE,
                    format!(
                        "'{conn_id}' module overridden: declared '{}', overlay '{module}'",
                        conn.module
                    ),
                );
            }
        }
    }
}

/// Page-level checks, then every button.
pub fn validate_page(page: &PageFile, known: &HashSet<&str>, report: &mut ValidationReport) {
    let source = page.source.as_str();
    let doc = &page.doc;

    if doc.page.page_number().is_none() {
        report.add_error(source, "Missing page number");
    }
    if doc.page.name.as_deref().is_none_or(str::is_empty) {
        report.add_warning(source, "Missing page name");
    }
    if doc.buttons.is_empty() {
        report.add_warning(source, "No buttons defined");
        return;
    }

    let mut positions = HashSet::new();
    for button in &doc.buttons {
        if let Some((row, col)) = button.grid_position() {
            if !positions.insert((row, col)) {
                report.add_error(source, format!("Duplicate button position [{row},{col}]"));
            }
        }
    }

    for button in &doc.buttons {
        validate_button(button, source, known, report);
    }
}

/// Checks on a single button.
pub fn validate_button(
    button: &ButtonSpec,
    source: &str,
    known: &HashSet<&str>,
    report: &mut ValidationReport,
) {
    let Some((row, col)) = button.grid_position() else {
        report.add_error(source, "Button missing valid position field");
        return;
    };
    let label = format!("[{row},{col}]");

    if !in_range(row, GRID_ROWS) {
        report.add_error(
            source,
            format!("Button {label} row {row} out of range (0-{})", GRID_ROWS - 1),
        );
    }
    if !in_range(col, GRID_COLS) {
        report.add_error(
            source,
            format!("Button {label} col {col} out of range (0-{})", GRID_COLS - 1),
        );
    }

    match button.style.as_ref().filter(|s| !s.is_empty()) {
        None => report.add_warning(source, format!("Button {label} has no style defined")),
        Some(style) => check_style(style, source, &label, report),
    }

    check_references("action", &button.actions.press, source, &label, known, report);
    check_references("step 2 action", button.second_step_actions(), source, &label, known, report);
    for feedback in &button.feedbacks {
        if !known.contains(feedback.connection.as_str()) {
            report.add_error(
                source,
                format!(
                    "Button {label} feedback references unknown connection '{}'",
                    feedback.connection
                ),
            );
        }
    }

    if button.notes.as_ref().is_some_and(|n| n.open_questions() > 0) {
        report.add_warning(source, format!("Button {label} has OPEN QUESTION in notes"));
    }

    if button.is_multistep() {
        if button.second_step_actions().is_empty() {
            report.add_warning(
                source,
                format!(
                    "Button {label} has step_count={} but no step_2_actions",
                    button.step_count
                ),
            );
        }
        if button.step_2_timeout_ms.unwrap_or(0) == 0 {
            report.add_note(
                source,
                format!("Button {label} multi-step without timeout (will use default)"),
            );
        }
    }

    if button.actions.press.is_empty() {
        report.add_note(source, format!("Button {label} has no press actions (display-only)"));
    }
}

fn check_style(style: &StyleSpec, source: &str, label: &str, report: &mut ValidationReport) {
    for (field, value) in [("color_bg", &style.color_bg), ("color_text", &style.color_text)] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            if !looks_like_hex_color(value) {
                report.add_warning(
                    source,
                    format!("Button {label} {field} '{value}' may not be valid hex"),
                );
            }
        }
    }

    if let Some(size) = style.font_size.as_deref().filter(|s| !s.is_empty()) {
        if !FONT_SIZE_TOKENS.contains(&size) {
            report.add_warning(
                source,
                format!("Button {label} font_size '{size}' not in known sizes"),
            );
        }
    }
}

fn check_references(
    kind: &str,
    actions: &[ActionSpec],
    source: &str,
    label: &str,
    known: &HashSet<&str>,
    report: &mut ValidationReport,
) {
    for action in actions {
        if !known.contains(action.connection.as_str()) {
            report.add_error(
                source,
                format!(
                    "Button {label} {kind} references unknown connection '{}'",
                    action.connection
                ),
            );
        }
    }
}

fn in_range(value: i64, size: u32) -> bool {
    (0..i64::from(size)).contains(&value)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
