//! Robot mode JSON output implementation.

use std::path::Path;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, instrument, trace, warn};

use crate::error::CompileError;
use crate::validate::ValidationReport;

use super::{GenerationSummary, Output, RobotFormat};

/// JSON output implementation for scripting.
///
/// Every call writes exactly one JSON document to stdout (errors go to stderr).
pub struct RobotOutput {
    format: RobotFormat,
}

impl RobotOutput {
    #[instrument]
    pub fn new(format: RobotFormat) -> Self {
        debug!(?format, "Creating RobotOutput");
        Self { format }
    }

    fn render<T: Serialize + ?Sized>(&self, data: &T) -> Option<String> {
        let rendered = match self.format {
            RobotFormat::Json => serde_json::to_string_pretty(data),
            RobotFormat::JsonCompact => serde_json::to_string(data),
        };
        match rendered {
            Ok(json) => {
                trace!(json_len = json.len(), "JSON serialized");
                Some(json)
            }
            Err(e) => {
                warn!(error = %e, "Failed to serialize robot output");
                None
            }
        }
    }

    /// Output any serializable data as JSON to stdout.
    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        if let Some(json) = self.render(data) {
            println!("{json}");
        }
    }

    /// Output JSON to stderr.
    fn output_json_stderr<T: Serialize + ?Sized>(&self, data: &T) {
        if let Some(json) = self.render(data) {
            eprintln!("{json}");
        }
    }
}

impl Output for RobotOutput {
    #[instrument(skip(self))]
    fn success(&self, message: &str) {
        self.output_json(&json!({
            "success": true,
            "message": message
        }));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &CompileError) {
        debug!(error = %error, "Robot: error");
        self.output_json_stderr(&json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        }));
    }

    #[instrument(skip(self))]
    fn warning(&self, message: &str) {
        self.output_json(&json!({
            "warning": true,
            "message": message
        }));
    }

    #[instrument(skip(self))]
    fn info(&self, message: &str) {
        self.output_json(&json!({
            "info": true,
            "message": message
        }));
    }

    #[instrument(skip_all, fields(issues = report.issues.len()))]
    fn validation_report(&self, report: &ValidationReport, strict: bool) {
        self.output_json(&json!({
            "valid": !report.blocks_generation(strict),
            "strict": strict,
            "summary": report.summary,
            "issues": report.issues,
        }));
    }

    #[instrument(skip_all)]
    fn generation_summary(&self, summary: &GenerationSummary) {
        self.output_json(&json!({
            "success": true,
            "summary": summary,
        }));
    }

    #[instrument(skip(self))]
    fn sample_written(&self, path: &Path) {
        self.output_json(&json!({
            "success": true,
            "sample": path.display().to_string(),
        }));
    }

    #[instrument(skip(self))]
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        self.output_json(&json!({
            "name": "cb",
            "version": version,
            "git_sha": git_sha,
            "build_time": build_time,
        }));
    }
}
