//! Companion builder - compile control-surface YAML into a Bitfocus Companion export.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io;

use clap::Parser;
use tracing::{debug, info, instrument};

use cb::cli::{Cli, Commands, CompletionsArgs, GenerateArgs, DEFAULT_OUTPUT, DEFAULT_SAMPLE_OUTPUT};
use cb::config::{load_project, Project};
use cb::error::Result;
use cb::export::{compile, sample_export, write_document};
use cb::identity::UuidGenerator;
use cb::logging::init_logging;
use cb::modules::registry;
use cb::output::{GenerationSummary, Output, OutputMode};
use cb::validate::validate_project;

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> bool {
        option_env!("VERGEN_GIT_DIRTY") == Some("true")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.use_json(), cli.verbose, cli.quiet);

    let output = OutputMode::from_cli(&cli).into_output();

    if let Err(e) = run(&cli, output.as_ref()) {
        output.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, output: &dyn Output) -> Result<()> {
    match &cli.command {
        None => cmd_generate(cli, GenerateArgs::default(), output),
        Some(Commands::Generate(args)) => cmd_generate(cli, *args, output),
        Some(Commands::Validate) => cmd_validate(cli, output),
        Some(Commands::Sample) => cmd_sample(cli, output),
        Some(Commands::Version) => {
            cmd_version(output);
            Ok(())
        }
        Some(Commands::Completions(args)) => {
            cmd_completions(args);
            Ok(())
        }
    }
}

/// Load the configuration set and report its findings, failing when they block generation.
fn load_and_validate(cli: &Cli, output: &dyn Output) -> Result<Project> {
    let project = load_project(&cli.config_dir)?;
    if !cli.quiet {
        output.info(&format!(
            "Loaded {} connections, {} custom variables, {} page files from {}",
            project.connections.len(),
            project.variables.len(),
            project.pages.len(),
            cli.config_dir.display()
        ));
    }

    let report = validate_project(&project);
    output.validation_report(&report, cli.strict);
    report.gate(cli.strict)?;
    if report.has_warnings() && !cli.quiet {
        output.warning(&format!(
            "Proceeding with {} warning(s)",
            report.summary.warning_count
        ));
    }
    Ok(project)
}

#[instrument(skip_all, fields(config_dir = %cli.config_dir.display()))]
fn cmd_generate(cli: &Cli, args: GenerateArgs, output: &dyn Output) -> Result<()> {
    let project = load_and_validate(cli, output)?;

    let compiled = compile(&project, registry(), &mut UuidGenerator);
    let path = cli.output_or(DEFAULT_OUTPUT);
    write_document(&compiled.export, &path, args.compact)?;
    info!(path = %path.display(), "Export generated");

    output.generation_summary(&GenerationSummary::new(&compiled, &path));
    Ok(())
}

#[instrument(skip_all, fields(config_dir = %cli.config_dir.display()))]
fn cmd_validate(cli: &Cli, output: &dyn Output) -> Result<()> {
    load_and_validate(cli, output)?;
    output.success("Validation passed. YAML specs are valid.");
    Ok(())
}

#[instrument(skip_all)]
fn cmd_sample(cli: &Cli, output: &dyn Output) -> Result<()> {
    let export = sample_export(registry(), &mut UuidGenerator);
    let path = cli.output_or(DEFAULT_SAMPLE_OUTPUT);
    write_document(&export, &path, false)?;
    debug!(path = %path.display(), "Sample written");
    output.sample_written(&path);
    Ok(())
}

fn cmd_version(output: &dyn Output) {
    let sha = if build_info::git_dirty() {
        format!("{} (dirty)", build_info::git_sha())
    } else {
        build_info::git_sha().to_string()
    };
    output.version_info(
        build_info::VERSION,
        Some(&sha),
        Some(build_info::build_timestamp()),
    );
}

fn cmd_completions(args: &CompletionsArgs) {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "cb", &mut io::stdout());
}
