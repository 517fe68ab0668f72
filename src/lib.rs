//! Companion builder library - compile authored control-surface configuration
//! into a Bitfocus Companion full export (format version 6).
//!
//! This library exposes the core functionality of the `cb` CLI for use in tests
//! and potentially other applications.
//!
//! # Modules
//!
//! - `config`: Authored document schema and loading from a configuration directory
//! - `modules`: Per-module strategies (field renames, action translation, defaults)
//! - `resolve`: Connection identity assignment and friendly-identifier resolution
//! - `export`: Button, page, and document assembly
//! - `validate`: Pre-generation checks with severity levels
//! - `error`: Error types with user-recoverable hints
//! - `output`: Output mode abstraction (robot/human)
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod identity;
pub mod logging;
pub mod modules;
pub mod output;
pub mod resolve;
pub mod style;
pub mod theme;
pub mod validate;
