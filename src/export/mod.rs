//! Companion export assembly.
//!
//! [`build_export`] runs the full pipeline over a loaded [`Project`]:
//! connections are resolved first (they own the first identities drawn),
//! then every page in input order, then custom variables.
//!
//! The result is deterministic apart from the identities, which come from
//! the injected [`IdGenerator`].

pub mod button;
pub mod page;
pub mod sample;
pub mod schema;

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::{Project, VariableSpec};
use crate::error::{Result, ResultExt};
use crate::identity::IdGenerator;
use crate::modules::ModuleRegistry;
use crate::resolve::{resolve_connections, ConnectionTable, IdentifierResolver};

pub use button::{build_style, feedback_style, ButtonAssembler};
pub use page::{build_page, GRID_COLS, GRID_ROWS, GRID_SIZE};
pub use sample::{sample_export, sample_project};
pub use schema::{
    ButtonOptions, ButtonStyle, FeedbackStyle, GridSize, ResolvedAction, ResolvedButton,
    ResolvedExport, ResolvedFeedback, ResolvedPage, ResolvedStep, ResolvedVariable,
};

/// Export format version understood by Companion 3.x/4.x.
pub const FORMAT_VERSION: u32 = 6;
/// Full export (pages, connections, and variables).
pub const EXPORT_TYPE: &str = "full";
/// Build tag written into `companionBuild`.
pub const COMPANION_BUILD: &str = "yaml-converter-v1.0";

/// Export plus the connection table used to build it.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub export: ResolvedExport,
    pub connections: ConnectionTable,
}

/// Compile a project into an export document.
#[must_use]
pub fn build_export(
    project: &Project,
    registry: &ModuleRegistry,
    ids: &mut dyn IdGenerator,
) -> ResolvedExport {
    compile(project, registry, ids).export
}

/// Compile a project, keeping the connection table for reporting.
#[instrument(skip_all, fields(pages = project.pages.len(), connections = project.connections.len()))]
pub fn compile(project: &Project, registry: &ModuleRegistry, ids: &mut dyn IdGenerator) -> Compiled {
    let connections = resolve_connections(
        &project.connections,
        project.parameters.as_ref(),
        registry,
        ids,
    );
    let resolver = IdentifierResolver::new(registry, &connections);

    let mut pages = IndexMap::new();
    {
        let mut assembler = ButtonAssembler::new(&resolver, ids);
        for file in &project.pages {
            let number = file.doc.page.page_number().unwrap_or(0);
            let page = build_page(&file.doc, &mut assembler);
            debug!(source = %file.source, number, buttons = page.button_count(), "Built page");
            pages.insert(number.to_string(), page);
        }
    }

    let export = ResolvedExport {
        version: FORMAT_VERSION,
        export_type: EXPORT_TYPE.to_string(),
        companion_build: COMPANION_BUILD.to_string(),
        pages,
        instances: connections.instances.clone(),
        custom_variables: build_variables(&project.variables),
    };

    info!(
        pages = export.pages.len(),
        buttons = export.button_count(),
        instances = export.instances.len(),
        variables = export.custom_variables.len(),
        "Export assembled"
    );

    Compiled {
        export,
        connections,
    }
}

/// Convert declared custom variables. Entries without a name are skipped but
/// still consume a `sortOrder` slot.
#[must_use]
pub fn build_variables(variables: &[VariableSpec]) -> IndexMap<String, ResolvedVariable> {
    variables
        .iter()
        .enumerate()
        .filter(|(_, var)| !var.name.is_empty())
        .map(|(index, var)| {
            (
                var.name.clone(),
                ResolvedVariable {
                    description: var.description.clone(),
                    default_value: var.default.clone(),
                    persist_current_value: false,
                    sort_order: index,
                },
            )
        })
        .collect()
}

/// Serialize an export document to `path`, creating parent directories.
///
/// Pretty-printed with two-space indentation unless `compact` is set.
#[instrument(skip(document))]
pub fn write_document<T: Serialize + ?Sized>(document: &T, path: &Path, compact: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut json = if compact {
        serde_json::to_string(document)?
    } else {
        serde_json::to_string_pretty(document)?
    };
    json.push('\n');
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Export written");
    Ok(())
}
