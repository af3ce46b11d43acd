//! Error types for scheme construction and value conversion.
//!
//! There are two families: [`SchemeError`] describes a malformed scheme and
//! aborts parsing before any argument is looked at, while
//! [`ConversionError`] describes a single
//! option whose value could not be converted and is embedded per key in
//! [`ResolvedOptions`](crate::ResolvedOptions).

use thiserror::Error;

use crate::types::ScalarType;

/// Structural errors in a scheme definition.
#[derive(Debug, Error)]
pub enum SchemeError {
    /// The scheme document is not a mapping, or an entry has the wrong shape.
    #[error("illegal scheme: {0}")]
    IllegalScheme(String),
    /// An option was declared with an empty key.
    #[error("option key cannot be empty")]
    EmptyKey,
    /// An option key or alias collides with `-h/--help` or `-v/--version`.
    #[error("reserved option name: {0}")]
    ReservedKey(String),
    /// Two options share a key or alias.
    #[error("duplicate option name in scheme: {0}")]
    DuplicateName(String),
    /// The isolated bucket name is also used by an option.
    #[error("isolated name collides with an option: {0}")]
    IsolatedNameCollision(String),
    /// Scheme file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON scheme could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML scheme could not be decoded.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failure to turn a raw argument into its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The declared type name is not recognized.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    /// Input has no numeric prefix.
    #[error("'{raw}' is not a valid {expected}")]
    NotANumber { raw: String, expected: ScalarType },
    /// Flag was given without a value but its type needs one.
    #[error("missing value for {expected} option")]
    MissingValue { expected: String },
    /// Array value is not a JSON-encoded array.
    #[error("invalid array value '{raw}': {reason}")]
    InvalidArray { raw: String, reason: String },
    /// One element of an array value could not be converted.
    #[error("invalid array element at index {index}: {source}")]
    InvalidElement {
        index: usize,
        source: Box<ConversionError>,
    },
}

/// Result alias for scheme-level operations.
pub type Result<T> = std::result::Result<T, SchemeError>;

/// A conversion failure attributed to the option it occurred on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("option '{name}': {source}")]
pub struct OptionError {
    pub name: String,
    pub source: ConversionError,
}
