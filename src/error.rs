//! Error types for pier-scaffold operations.
//!
//! This module defines [`PierError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PierError` for failures that stop an install or publish
//! - Soft failures (missing `laravel.test`, no Docker, TTY attach) are
//!   reported as UI warnings and never become errors
//! - Use `anyhow::Error` (via `PierError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pier-scaffold operations.
#[derive(Debug, Error)]
pub enum PierError {
    /// A bundled stub or runtime file does not exist.
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Failed to parse a YAML document.
    #[error("Failed to parse YAML at {path}: {message}")]
    YamlParse { path: PathBuf, message: String },

    /// The compose document has an unexpected shape.
    #[error("Invalid compose document: {message}")]
    InvalidCompose { message: String },

    /// The requested PHP version has no bundled runtime.
    #[error("Unsupported PHP version '{version}' (available: {available})")]
    UnsupportedPhpVersion { version: String, available: String },

    /// Shell command could not be started or waited on.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pier-scaffold operations.
pub type Result<T> = std::result::Result<T, PierError>;
