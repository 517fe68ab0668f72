//! Human-friendly output implementation using `console` styles.

use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::error::CompileError;
use crate::theme::CbTheme;
use crate::validate::{Severity, ValidationReport};

use super::{GenerationSummary, Output};

/// Number of opaque-identity characters shown in the verbose connection table.
const SHORT_ID_LEN: usize = 8;

/// Styled terminal output implementation for human users.
pub struct HumanOutput {
    theme: CbTheme,
    verbose: bool,
}

impl HumanOutput {
    #[instrument]
    pub fn new(verbose: bool) -> Self {
        debug!("Creating HumanOutput");
        Self {
            theme: CbTheme::default(),
            verbose,
        }
    }

    fn tag(&self, severity: Severity) -> String {
        let (text, style) = match severity {
            Severity::Error => ("[ERROR]", &self.theme.error),
            Severity::Warning => ("[WARN] ", &self.theme.warning),
            Severity::Info => ("[INFO] ", &self.theme.info),
        };
        style.apply_to(text).to_string()
    }

    fn count_line(&self, label: &str, count: usize) {
        println!(
            "  {} {}",
            self.theme.label.apply_to(format!("{label:<9}")),
            self.theme.value.apply_to(count)
        );
    }
}

fn short_id(id: &str) -> &str {
    id.char_indices()
        .nth(SHORT_ID_LEN)
        .map_or(id, |(end, _)| &id[..end])
}

impl Output for HumanOutput {
    #[instrument(skip(self))]
    fn success(&self, message: &str) {
        println!("{} {message}", self.theme.success.apply_to("[OK]"));
    }

    #[instrument(skip(self))]
    fn error(&self, error: &CompileError) {
        debug!(
            error = %error,
            recoverable = error.is_user_recoverable(),
            "Outputting error"
        );
        eprintln!();
        eprintln!("  {} {}", self.theme.error.apply_to("[ERR]"), console::style(error).bold());
        if let Some(suggestion) = error.suggestion() {
            trace!(suggestion, "Adding suggestion");
            eprintln!();
            eprintln!("  {}", self.theme.label.apply_to("Suggestion:"));
            eprintln!("  {}", self.theme.muted.apply_to(suggestion));
        }
        eprintln!();
    }

    #[instrument(skip(self))]
    fn warning(&self, message: &str) {
        eprintln!("{} {message}", self.theme.warning.apply_to("[WARN]"));
    }

    #[instrument(skip(self))]
    fn info(&self, message: &str) {
        println!("{} {message}", self.theme.info.apply_to("[INFO]"));
    }

    #[instrument(skip_all, fields(issues = report.issues.len()))]
    fn validation_report(&self, report: &ValidationReport, strict: bool) {
        println!();
        println!("{}", self.theme.header.apply_to("Validation Results"));
        self.count_line("ERRORS:", report.summary.error_count);
        self.count_line("WARNINGS:", report.summary.warning_count);
        self.count_line("INFO:", report.summary.info_count);
        println!();

        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            for issue in report.with_severity(severity) {
                println!("  {} {issue}", self.tag(severity));
            }
        }
        if !report.issues.is_empty() {
            println!();
        }

        if report.has_errors() {
            println!(
                "{}",
                self.theme
                    .error
                    .apply_to("Validation failed with errors. Fix errors before generating config.")
            );
        } else if strict && report.has_warnings() {
            println!("{}", self.theme.warning.apply_to("Strict mode: warnings treated as errors."));
        }
    }

    #[instrument(skip_all, fields(output = %summary.output))]
    fn generation_summary(&self, summary: &GenerationSummary) {
        if self.verbose {
            println!("{}", self.theme.header.apply_to("Connections"));
            for (name, opaque) in &summary.connection_ids {
                println!(
                    "    {name} -> {}",
                    self.theme.muted.apply_to(format!("{}...", short_id(opaque)))
                );
            }
            println!("{}", self.theme.header.apply_to("Pages"));
            for page in &summary.page_details {
                println!("  Page {}: {} ({} buttons)", page.number, page.name, page.buttons);
            }
        }

        println!();
        println!("{} Config generated successfully!", self.theme.success.apply_to("[OK]"));
        println!("  {} {}", self.theme.label.apply_to("Output:     "), summary.output);
        println!("  {} {}", self.theme.label.apply_to("Pages:      "), summary.pages);
        println!("  {} {}", self.theme.label.apply_to("Buttons:    "), summary.buttons);
        println!("  {} {}", self.theme.label.apply_to("Connections:"), summary.connections);
        println!("  {} {}", self.theme.label.apply_to("Variables:  "), summary.variables);
    }

    #[instrument(skip(self))]
    fn sample_written(&self, path: &Path) {
        println!(
            "{} Sample config written to: {}",
            self.theme.success.apply_to("[OK]"),
            path.display()
        );
        println!(
            "{}",
            self.theme
                .muted
                .apply_to("Compare this against a real Companion export to verify the format.")
        );
    }

    #[instrument(skip(self))]
    fn version_info(&self, version: &str, git_sha: Option<&str>, build_time: Option<&str>) {
        println!("{} {version}", self.theme.header.apply_to("cb"));
        if let Some(sha) = git_sha {
            println!("  {} {sha}", self.theme.label.apply_to("commit:"));
        }
        if let Some(time) = build_time {
            println!("  {} {time}", self.theme.label.apply_to("built: "));
        }
    }
}
