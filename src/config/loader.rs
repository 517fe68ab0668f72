//! Reading a configuration set from disk.
//!
//! Every document may be written as YAML, TOML, or JSON; the format is
//! picked from the file extension. The well-known documents are looked up
//! under each extension in that order, so `connections.yaml` wins over
//! `connections.toml` when both exist.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, trace};

use crate::error::{CompileError, Result, ResultExt};

use super::schema::{
    ConnectionsDoc, PageDoc, PageFile, ParametersDoc, Project, VariablesDoc,
};

/// Base name of the connections document.
pub const CONNECTIONS_FILE: &str = "connections";
/// Base name of the variables document.
pub const VARIABLES_FILE: &str = "variables";
/// Base name of the optional site overlay.
pub const PARAMETERS_FILE: &str = "parameters";
/// Directory holding page documents.
pub const PAGES_DIR: &str = "pages";
/// Prefix every page document name starts with.
pub const PAGE_PREFIX: &str = "page";

/// Document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml).
    Yaml,
    /// TOML format (.toml).
    Toml,
    /// JSON format (.json).
    Json,
}

impl ConfigFormat {
    /// Formats in lookup order.
    pub const ALL: [Self; 3] = [Self::Yaml, Self::Toml, Self::Json];

    /// Detect format from file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        trace!(extension = %ext, "Detecting document format from extension");
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// Parse a document from a string.
///
/// `origin` names the document in error messages.
///
/// # Errors
///
/// Returns [`CompileError::Parse`] if the content does not match `T`.
pub fn parse_document<T: DeserializeOwned>(
    content: &str,
    format: ConfigFormat,
    origin: &str,
) -> Result<T> {
    trace!(?format, bytes = content.len(), "Parsing document");
    let parsed = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| CompileError::Parse {
        path: origin.to_string(),
        reason,
    })
}

/// Read and parse one document, detecting the format from its extension.
///
/// An empty file parses as the document's default.
///
/// # Errors
///
/// Returns an error if the file is missing, has an unknown extension, or
/// does not parse.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_document<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let format = ConfigFormat::from_extension(path).ok_or_else(|| CompileError::UnknownFormat {
        path: path.display().to_string(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CompileError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            CompileError::Io(e)
        }
    })?;
    debug!(?format, bytes = content.len(), "Read document");

    if content.trim().is_empty() {
        return Ok(T::default());
    }
    parse_document(&content, format, &path.display().to_string())
}

/// First existing `{dir}/{base}.{ext}` over the supported extensions.
#[must_use]
pub fn find_document(dir: &Path, base: &str) -> Option<PathBuf> {
    ConfigFormat::ALL
        .iter()
        .flat_map(|format| match format {
            ConfigFormat::Yaml => vec!["yaml", "yml"],
            other => vec![other.extension()],
        })
        .map(|ext| dir.join(format!("{base}.{ext}")))
        .find(|candidate| candidate.is_file())
}

fn require_document(dir: &Path, base: &str) -> Result<PathBuf> {
    find_document(dir, base).ok_or_else(|| CompileError::FileNotFound {
        path: dir.join(format!("{base}.yaml")).display().to_string(),
    })
}

/// Page documents in `pages_dir`, sorted by file name.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or holds no page files.
pub fn page_files(pages_dir: &Path) -> Result<Vec<PathBuf>> {
    if !pages_dir.is_dir() {
        return Err(CompileError::ConfigDirNotFound {
            path: pages_dir.display().to_string(),
        });
    }

    let mut files = Vec::new();
    let entries = std::fs::read_dir(pages_dir)
        .with_context(|| format!("Failed to read {}", pages_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        let is_page = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(PAGE_PREFIX));
        if is_page && path.is_file() && ConfigFormat::from_extension(&path).is_some() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        return Err(CompileError::NoPages {
            path: pages_dir.display().to_string(),
        });
    }
    Ok(files)
}

/// Load a whole configuration set from its directory.
///
/// # Errors
///
/// Returns an error for a missing directory, missing or unparsable
/// documents, a connections document without a `connections` section, or
/// an empty pages directory. Nothing is returned partially.
#[instrument(skip_all, fields(dir = %config_dir.display()))]
pub fn load_project(config_dir: &Path) -> Result<Project> {
    info!("Loading configuration set");
    if !config_dir.is_dir() {
        return Err(CompileError::ConfigDirNotFound {
            path: config_dir.display().to_string(),
        });
    }

    let connections_path = require_document(config_dir, CONNECTIONS_FILE)?;
    let connections_doc: ConnectionsDoc = load_document(&connections_path)?;
    let connections = connections_doc
        .connections
        .ok_or_else(|| CompileError::MissingSection {
            path: connections_path.display().to_string(),
            section: "connections".to_string(),
        })?;

    let variables_path = require_document(config_dir, VARIABLES_FILE)?;
    let variables = load_document::<VariablesDoc>(&variables_path)?.custom_variables;

    let parameters = find_document(config_dir, PARAMETERS_FILE)
        .map(|path| load_document::<ParametersDoc>(&path))
        .transpose()?;

    let mut pages = Vec::new();
    for path in page_files(&config_dir.join(PAGES_DIR))? {
        let doc: PageDoc = load_document(&path)?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pages.push(PageFile { source, doc });
    }

    info!(
        connections = connections.len(),
        variables = variables.len(),
        pages = pages.len(),
        overlay = parameters.is_some(),
        "Configuration set loaded"
    );

    Ok(Project {
        connections,
        variables,
        parameters,
        pages,
    })
}
