//! Authored configuration: schema types and loading from disk.
//!
//! A configuration set is a directory of human-written documents describing
//! connections, custom variables, an optional site overlay, and pages of
//! buttons. See [`schema`] for the document shapes and [`loader`] for how a
//! directory becomes a [`Project`].

pub mod loader;
pub mod schema;

pub use loader::{
    find_document, load_document, load_project, page_files, parse_document, ConfigFormat,
};
pub use schema::{
    ActionSet, ActionSpec, ButtonSpec, ConnectionSpec, ConnectionsDoc, FeedbackSpec, Machine,
    Notes, Options, PageDoc, PageFile, PageMeta, ParametersDoc, Project, StyleSpec, VariableSpec,
    VariablesDoc, INTERNAL_CONNECTION, MODULE_OVERRIDE_KEY, OPEN_QUESTION_MARKER,
    UNDETERMINED_MODULE,
};
