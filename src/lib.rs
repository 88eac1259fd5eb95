//! yuca generates documents such as a CV or an academic webpage by combining
//! a reusable template bundle with a user's structured data, under the
//! user's overrides and selections.

/// Static asset replacement inside the output directory
pub mod assets;

/// Command-line interface module for the yuca application
pub mod cli;

/// Pre and post cook shell commands
pub mod commands;

/// Template descriptors and generation configs
pub mod config;

/// Error types and handling for the yuca application
pub mod error;

/// Per-format escaping of context strings
pub mod escape;

/// Generation orchestration
/// Copies the template, prepares the context and renders the declared files
pub mod generator;

/// Logger setup for the binary
pub mod logger;

/// Route-based access into a context
pub mod navigator;

/// Specification keys and routes
pub mod path;

/// Recipe loading and the cook command
pub mod recipe;

/// In-place template rendering
pub mod renderer;

/// Overrides and filters
pub mod transform;

/// Warehouse layout and template installation
pub mod warehouse;
