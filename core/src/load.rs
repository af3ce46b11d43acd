//! Loading schemes from JSON and YAML documents.
//!
//! The document is a mapping. The reserved key `define` holds the scheme
//! metadata; every other key is an option key whose value describes the
//! option:
//!
//! ```yaml
//! define:
//!   version: 0.0.1
//!   description: Keep the newest files in a folder
//! f:
//!   alias: folder
//!   type: str
//!   help: Target folder
//!   symbol: folder
//! c:
//!   alias: count
//!   type: int
//!   default: 5
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, SchemeError};
use crate::types::{Meta, OptionSpec, SchemeDefinition};

/// Key that holds [`Meta`] in a scheme document.
pub const META_KEY: &str = "define";

impl SchemeDefinition {
    /// Builds a scheme from an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemeError::IllegalScheme`] if `value` is not an object or
    /// any entry does not have the expected shape.
    pub fn from_json_value(value: Value) -> Result<Self> {
        let Value::Object(entries) = value else {
            return Err(SchemeError::IllegalScheme(format!(
                "expected a mapping, found {}",
                kind_of(&value)
            )));
        };

        let mut scheme = SchemeDefinition::new();
        for (key, body) in entries {
            if key == META_KEY {
                scheme.meta = serde_json::from_value::<Meta>(body)
                    .map_err(|e| SchemeError::IllegalScheme(format!("'{META_KEY}': {e}")))?;
                continue;
            }
            if !body.is_object() {
                return Err(SchemeError::IllegalScheme(format!(
                    "option '{key}' must be a mapping, found {}",
                    kind_of(&body)
                )));
            }
            let mut option = serde_json::from_value::<OptionSpec>(body)
                .map_err(|e| SchemeError::IllegalScheme(format!("option '{key}': {e}")))?;
            option.key = key;
            scheme.options.push(option);
        }

        debug!(options = scheme.options.len(), "Loaded scheme");
        Ok(scheme)
    }

    /// Parses a JSON scheme document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_json_value(serde_json::from_str(raw)?)
    }

    /// Parses a YAML scheme document.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Self::from_json_value(serde_yaml::from_str(raw)?)
    }

    /// Reads a scheme file; `.yaml`/`.yml` files are read as YAML, anything
    /// else as JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&raw),
            _ => Self::from_json_str(&raw),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{OptionValue, ValueType};

    use super::*;

    #[test]
    fn test_from_json_keeps_declaration_order() {
        let scheme = SchemeDefinition::from_json_str(
            r#"{
                "define": { "version": "0.0.1", "isolated": "rest" },
                "o": { "alias": "output", "type": "str" },
                "b": { "alias": "blank", "type": "str" },
                "ra": { "alias": "rearrange", "type": "str" }
            }"#,
        )
        .unwrap();

        let keys: Vec<&str> = scheme.options.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["o", "b", "ra"]);
        assert_eq!(scheme.meta.version.as_deref(), Some("0.0.1"));
        assert_eq!(scheme.meta.isolated.as_deref(), Some("rest"));
    }

    #[test]
    fn test_from_yaml_reads_defaults() {
        let scheme = SchemeDefinition::from_yaml_str(
            "define:\n  description: prune\nc:\n  alias: count\n  type: int\n  default: 5\nD:\n  type: bool\n  default: false\n",
        )
        .unwrap();

        let count = scheme.find("count").unwrap();
        assert_eq!(count.default, Some(OptionValue::Integer(5)));
        assert_eq!(count.value_type(), Ok(ValueType::INTEGER));
        assert_eq!(
            scheme.find("D").unwrap().default,
            Some(OptionValue::Bool(false))
        );
    }

    #[test]
    fn test_non_mapping_scheme_is_illegal() {
        let err = SchemeDefinition::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, SchemeError::IllegalScheme(_)));
    }

    #[test]
    fn test_non_mapping_option_is_illegal() {
        let err = SchemeDefinition::from_json_str(r#"{ "f": "folder" }"#).unwrap_err();
        assert!(matches!(err, SchemeError::IllegalScheme(msg) if msg.contains("'f'")));
    }

    #[test]
    fn test_missing_type_defaults_to_string() {
        let scheme = SchemeDefinition::from_json_str(r#"{ "f": { "alias": "folder" } }"#).unwrap();
        assert_eq!(scheme.options[0].value_type(), Ok(ValueType::STRING));
    }

    #[test]
    fn test_unknown_type_name_loads_and_fails_later() {
        let scheme = SchemeDefinition::from_json_str(r#"{ "d": { "type": "date" } }"#).unwrap();
        assert!(scheme.options[0].value_type().is_err());
    }

    #[test]
    fn test_from_path_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("scheme.yml");
        fs::write(&yaml, "f:\n  alias: folder\n").unwrap();
        let json = dir.path().join("scheme.json");
        fs::write(&json, r#"{ "f": { "alias": "folder" } }"#).unwrap();

        assert_eq!(
            SchemeDefinition::from_path(&yaml).unwrap(),
            SchemeDefinition::from_path(&json).unwrap()
        );
    }
}
