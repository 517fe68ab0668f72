//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default location of the configuration set.
pub const DEFAULT_CONFIG_DIR: &str = "config";
/// Default export path for `generate`.
pub const DEFAULT_OUTPUT: &str = "output/companion-config.companionconfig";
/// Default export path for `sample`.
pub const DEFAULT_SAMPLE_OUTPUT: &str = "output/sample-config.json";

/// Companion builder - compile control-surface YAML into a Bitfocus Companion export.
///
/// Robot Mode: Use --robot or --format json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "cb", version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)] // CLI flags naturally use multiple bools
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "CB_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration directory (connections.yaml, variables.yaml, pages/)
    #[arg(
        long,
        short = 'c',
        default_value = DEFAULT_CONFIG_DIR,
        global = true,
        env = "CB_CONFIG_DIR"
    )]
    pub config_dir: PathBuf,

    /// File to write (defaults depend on the command)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,

    /// Treat warnings as errors
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    #[must_use]
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    #[must_use]
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }

    /// `--output`, or the given default.
    #[must_use]
    pub fn output_or(&self, default: &str) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from(default))
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the configuration set and write the Companion export (default)
    Generate(GenerateArgs),

    /// Validate the configuration set without writing anything
    Validate,

    /// Write a minimal sample export for format comparison
    Sample,

    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct GenerateArgs {
    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
