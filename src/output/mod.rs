//! Output mode abstraction for robot and human output.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::cli::Cli;
use crate::error::CompileError;
use crate::export::Compiled;
use crate::validate::ValidationReport;

pub mod human;
pub mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

/// What a successful `generate` run produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub output: String,
    pub pages: usize,
    pub buttons: usize,
    pub connections: usize,
    pub variables: usize,
    /// Per-page button counts, in export order.
    pub page_details: Vec<PageSummary>,
    /// Connection name to opaque identity, without `internal`.
    pub connection_ids: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub number: String,
    pub name: String,
    pub buttons: usize,
}

impl GenerationSummary {
    #[must_use]
    pub fn new(compiled: &Compiled, output: &Path) -> Self {
        let export = &compiled.export;
        let page_details = export
            .pages
            .iter()
            .map(|(number, page)| PageSummary {
                number: number.clone(),
                name: page.name.clone(),
                buttons: page.button_count(),
            })
            .collect();
        let connection_ids = compiled
            .connections
            .id_map
            .iter()
            .filter(|(name, _)| name.as_str() != crate::config::INTERNAL_CONNECTION)
            .map(|(name, opaque)| (name.clone(), opaque.clone()))
            .collect();

        Self {
            output: output.display().to_string(),
            pages: export.pages.len(),
            buttons: export.button_count(),
            connections: export.instances.len(),
            variables: export.custom_variables.len(),
            page_details,
            connection_ids,
        }
    }
}

/// JSON formatting options for robot mode.
#[derive(Debug, Clone, Copy)]
pub enum RobotFormat {
    /// Pretty-printed JSON (default for --robot).
    Json,
    /// Single-line JSON (--format=json-compact).
    JsonCompact,
}

/// Determines how command output is rendered.
#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    /// JSON output for scripting.
    Robot(RobotFormat),
    /// Styled terminal output for human users.
    Human { verbose: bool },
}

impl OutputMode {
    /// Create OutputMode from CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.use_json() {
            let format = if cli.use_compact_json() {
                RobotFormat::JsonCompact
            } else {
                RobotFormat::Json
            };
            Self::Robot(format)
        } else {
            if cli.no_color {
                console::set_colors_enabled(false);
                console::set_colors_enabled_stderr(false);
            }
            Self::Human {
                verbose: cli.verbose > 0,
            }
        }
    }

    /// Returns true if output should be JSON.
    #[must_use]
    pub const fn is_robot(&self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// Convert into the appropriate Output implementation.
    #[must_use]
    pub fn into_output(self) -> Box<dyn Output> {
        match self {
            Self::Robot(format) => Box::new(RobotOutput::new(format)),
            Self::Human { verbose } => Box::new(HumanOutput::new(verbose)),
        }
    }
}

/// Trait for all output operations.
///
/// Commands call these methods without knowing the output mode.
pub trait Output {
    // Basic messages
    fn success(&self, message: &str);
    fn error(&self, error: &CompileError);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);

    /// Findings of a validation run.
    fn validation_report(&self, report: &ValidationReport, strict: bool);

    /// Result of a successful `generate`.
    fn generation_summary(&self, summary: &GenerationSummary);

    /// Result of `sample`.
    fn sample_written(&self, path: &Path);

    // Metadata
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>);
}
