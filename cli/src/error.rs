//! Error type shared by the filekit tools.

use std::path::PathBuf;

use filekit_core::{ModeConflict, OptionError};
use thiserror::Error;

/// Errors that stop a tool run.
#[derive(Debug, Error)]
pub enum ToolError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `--folder` was not given.
    #[error("missing target folder (use -f/--folder)")]
    MissingFolder,

    /// `--folder` does not name a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A numeric option is out of range for the tool.
    #[error("invalid {name}: {value}")]
    InvalidNumber { name: &'static str, value: i64 },

    /// A date option could not be parsed.
    #[error("invalid date: '{0}' (expected YYYY-MM-DD, YYYY-MM-DD HH:MM:SS or RFC 3339)")]
    InvalidDate(String),

    /// More than one exclusive mode was selected.
    #[error(transparent)]
    Mode(#[from] ModeConflict),

    /// An option value did not convert to its declared type.
    #[error(transparent)]
    Option(#[from] OptionError),
}

/// Convenience alias for results with [`ToolError`].
pub type Result<T> = std::result::Result<T, ToolError>;
