use std::path::PathBuf;
use thiserror::Error;

use crate::core::{ParseError, ValidationError};

/// Errors that can occur while reading the trigger configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    /// The requested section header never appears.
    #[error("Section [{0}] not found in config")]
    SectionNotFound(String),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single trigger option was skipped.
#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Line in the trigger section that is not `name = value`.
    #[error("Malformed config line: {0}")]
    MalformedLine(String),
    /// Option name has neither prefix under the naming-convention rule.
    #[error("Invalid trigger type for option '{0}': expected a `command_` or `signal_` prefix")]
    UnknownKind(String),
}
