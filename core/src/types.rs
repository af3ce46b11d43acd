//! Scheme type definitions.
//!
//! A scheme is the declarative description of one command's options: which
//! short keys and long aliases it recognizes, what type each value converts
//! to, the help text, defaults, and the metadata shown by `--help` and
//! `--version`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Option names reserved for the built-in help and version flags.
pub const RESERVED_NAMES: [&str; 4] = ["h", "v", "help", "version"];

static ARRAY_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^arr(?:ay)?:").expect("static regex must compile"));

/// Non-array value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Raw string, passed through unchanged.
    String,
    /// Decimal number.
    Number,
    /// Whole number, truncated from the leading numeric portion.
    Integer,
    /// Boolean flag.
    Boolean,
}

impl ScalarType {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "str" | "string" => Some(Self::String),
            "num" | "number" | "float" => Some(Self::Number),
            "int" | "integer" => Some(Self::Integer),
            "bool" | "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Declared type of an option value.
///
/// Parsed from the type names used in scheme files: `str`/`string`,
/// `num`/`number`/`float`, `int`/`integer`, `bool`/`boolean`, and
/// `arr:<T>`/`array:<T>` (the array word in any letter case).
///
/// # Examples
///
/// ```
/// use filekit_core::{ScalarType, ValueType};
///
/// assert_eq!("int".parse::<ValueType>(), Ok(ValueType::Scalar(ScalarType::Integer)));
/// assert_eq!("ARR:str".parse::<ValueType>(), Ok(ValueType::Array(ScalarType::String)));
/// assert!("date".parse::<ValueType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// A single value.
    Scalar(ScalarType),
    /// A JSON-encoded array whose elements convert to the given type.
    Array(ScalarType),
}

impl ValueType {
    pub const STRING: ValueType = ValueType::Scalar(ScalarType::String);
    pub const NUMBER: ValueType = ValueType::Scalar(ScalarType::Number);
    pub const INTEGER: ValueType = ValueType::Scalar(ScalarType::Integer);
    pub const BOOLEAN: ValueType = ValueType::Scalar(ScalarType::Boolean);

    /// Returns `true` for boolean scalars, the only type a bare flag satisfies.
    pub fn is_boolean(&self) -> bool {
        matches!(self, ValueType::Scalar(ScalarType::Boolean))
    }
}

impl FromStr for ValueType {
    type Err = ConversionError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let unsupported = || ConversionError::UnsupportedType(name.to_string());
        match ARRAY_PREFIX_RE.find(name) {
            Some(prefix) => ScalarType::from_name(&name[prefix.end()..])
                .map(ValueType::Array)
                .ok_or_else(unsupported),
            None => ScalarType::from_name(name)
                .map(ValueType::Scalar)
                .ok_or_else(unsupported),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(f, "{scalar}"),
            Self::Array(scalar) => write!(f, "array:{scalar}"),
        }
    }
}

/// A typed option value.
///
/// Serializes untagged, so resolved options render as plain JSON values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    Array(Vec<OptionValue>),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as a float; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[OptionValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Whether the value selects a mode: `true`, a non-empty string, or a
    /// non-empty array.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::String(s) => !s.is_empty(),
            Self::Array(items) => !items.is_empty(),
            Self::Integer(_) | Self::Number(_) => false,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<OptionValue>> for OptionValue {
    fn from(value: Vec<OptionValue>) -> Self {
        Self::Array(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::Array(value.into_iter().map(OptionValue::String).collect())
    }
}

fn default_type_name() -> String {
    ValueType::STRING.to_string()
}

/// Schema for a single option.
///
/// The `key` is the short form used as `-key`, the optional `alias` is the
/// long form used as `--alias`. The type is kept as written in the scheme
/// and parsed when the scheme is linked, so an unknown type name only
/// affects the option that declares it.
///
/// # Examples
///
/// ```
/// use filekit_core::{OptionSpec, OptionValue, ValueType};
///
/// let output = OptionSpec::new("o", ValueType::STRING)
///     .with_alias("output")
///     .with_help("Output directory")
///     .with_default("./")
///     .with_symbol("output");
///
/// assert_eq!(output.alias.as_deref(), Some("output"));
/// assert_eq!(output.default, Some(OptionValue::from("./")));
/// assert_eq!(output.value_type(), Ok(ValueType::STRING));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Short key (e.g. "f"), supplied by the enclosing mapping when loaded.
    #[serde(skip)]
    pub key: String,
    /// Long name (e.g. "folder")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Type name as declared (e.g. "str", "arr:int")
    #[serde(rename = "type", default = "default_type_name")]
    pub type_name: String,
    /// Help text shown by `--help`
    #[serde(default)]
    pub help: String,
    /// Value used when neither form is supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<OptionValue>,
    /// Placeholder shown in usage and help
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl OptionSpec {
    /// Creates an option with a typed value.
    pub fn new(key: &str, value_type: ValueType) -> Self {
        Self::with_type_name(key, &value_type.to_string())
    }

    /// Creates an option from a type name as it would appear in a scheme file.
    ///
    /// The name is not checked until the scheme is linked.
    pub fn with_type_name(key: &str, type_name: &str) -> Self {
        Self {
            key: key.to_string(),
            alias: None,
            type_name: type_name.to_string(),
            help: String::new(),
            default: None,
            symbol: None,
        }
    }

    /// Sets the long alias.
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// Sets the help text.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, default: impl Into<OptionValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the usage placeholder.
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    /// Parses the declared type name.
    pub fn value_type(&self) -> Result<ValueType, ConversionError> {
        self.type_name.parse()
    }

    /// Checks if this option answers to a name (short key or alias).
    pub fn matches(&self, name: &str) -> bool {
        self.key == name || self.alias.as_deref() == Some(name)
    }
}

/// Scheme metadata: what `--version` and `--help` print and where
/// positional arguments go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Version string printed by `-v/--version`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Description printed in the help header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name under which positional arguments are collected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isolated: Option<String>,
}

/// Complete scheme for a command.
///
/// Options keep their declaration order, which is the order help output
/// lists them in.
///
/// # Examples
///
/// ```
/// use filekit_core::*;
///
/// let scheme = SchemeDefinition::new()
///     .with_version("0.0.1")
///     .with_description("List a folder")
///     .with_isolated("rest")
///     .with_option(OptionSpec::new("f", ValueType::STRING).with_alias("folder"));
///
/// assert!(scheme.find("folder").is_some());
/// assert_eq!(scheme.meta.isolated.as_deref(), Some("rest"));
/// assert!(validate_scheme(&scheme).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemeDefinition {
    /// Declared options, in declaration order
    pub options: Vec<OptionSpec>,
    /// Version, description and isolated bucket name
    pub meta: Meta,
}

impl SchemeDefinition {
    /// Creates an empty scheme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the version string.
    pub fn with_version(mut self, version: &str) -> Self {
        self.meta.version = Some(version.to_string());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.meta.description = Some(description.to_string());
        self
    }

    /// Collects positional arguments under `name`.
    pub fn with_isolated(mut self, name: &str) -> Self {
        self.meta.isolated = Some(name.to_string());
        self
    }

    /// Appends an option.
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Finds an option by short key or alias.
    pub fn find(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.matches(name))
    }
}
