//! Error handling for yuca.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Errors produced while preparing a context or generating output.
///
/// Path, structure and index errors are fatal for a generation run; the
/// orchestrator absorbs missing template files and unknown locales itself
/// and never turns them into a `YucaError`.
#[derive(Error, Debug)]
pub enum YucaError {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised while walking a directory tree
    #[error("Directory traversal error: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    /// Represents errors while parsing YAML documents
    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    /// Represents errors that occur during template rendering
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors in descriptors, recipes or generation configs
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents failures of pre/post cook commands
    #[error("Command execution error: {0}.")]
    CommandError(String),

    /// A specification key is neither `name` nor `name[index]`
    #[error("Malformed path key '{key}': expected `name` or `name[index]`.")]
    MalformedKey { key: String },

    /// A specification key carries an index but its value is not a mapping
    #[error("Path key '{key}' at '{route}' addresses a sequence element but its value is not a mapping.")]
    IndexedLeaf { key: String, route: String },

    /// A route has no segments
    #[error("Empty route.")]
    EmptyRoute,

    /// Traversal found a value of the wrong shape
    #[error("Structural mismatch at '{route}': expected {expected}, found {found}.")]
    StructuralMismatch {
        route: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Traversal reached a mapping without the requested field
    #[error("Missing field '{field}' while resolving '{route}'.")]
    MissingField { field: String, route: String },

    /// A filter or route index lies beyond the end of a sequence
    #[error("Index {index} out of range at '{route}' (length {len}).")]
    IndexOutOfRange {
        route: String,
        index: usize,
        len: usize,
    },

    /// A filter leaf is not a list of non-negative integers
    #[error("Invalid filter at '{route}': expected a list of indices.")]
    InvalidFilter { route: String },
}

/// Convenience type alias for Results with `YucaError` as the error type.
pub type YucaResult<T> = std::result::Result<T, YucaError>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Logs the error message and exits with status code 1
pub fn default_error_handler(err: YucaError) {
    log::error!("{err}");
    std::process::exit(1);
}
