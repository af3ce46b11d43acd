//! The parsed, typed options handed back to calling code.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::error::{ConversionError, OptionError};
use crate::types::OptionValue;

/// Final result of parsing.
///
/// Every value is stored under the option's short key and, when declared,
/// its alias, so callers may look up either name. Options whose value
/// failed to convert have no value; their error is kept under the same
/// names instead.
///
/// Serializes as a flat JSON object of the successfully resolved values.
///
/// # Examples
///
/// ```
/// use filekit_core::*;
///
/// let scheme = SchemeDefinition::new()
///     .with_option(OptionSpec::new("o", ValueType::STRING).with_alias("output").with_default("./"));
///
/// let Outcome::Options(options) = parse_args(&scheme, "tool", Vec::<String>::new()).unwrap() else {
///     unreachable!()
/// };
/// assert_eq!(options.get_str("o"), Some("./"));
/// assert_eq!(options.get_str("output"), Some("./"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions {
    values: BTreeMap<String, OptionValue>,
    failures: BTreeMap<String, ConversionError>,
}

impl ResolvedOptions {
    pub(crate) fn insert(&mut self, name: &str, value: OptionValue) {
        self.failures.remove(name);
        self.values.insert(name.to_string(), value);
    }

    pub(crate) fn insert_failure(&mut self, name: &str, error: ConversionError) {
        self.values.remove(name);
        self.failures.insert(name.to_string(), error);
    }

    /// Whether the name holds either a value or a failure.
    pub(crate) fn is_resolved(&self, name: &str) -> bool {
        self.values.contains_key(name) || self.failures.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(OptionValue::as_bool)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptionValue::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(OptionValue::as_f64)
    }

    pub fn get_list(&self, name: &str) -> Option<&[OptionValue]> {
        self.get(name).and_then(OptionValue::as_array)
    }

    /// Returns the string elements of a list value, such as the isolated
    /// arguments.
    pub fn get_strings(&self, name: &str) -> Vec<&str> {
        self.get_list(name)
            .unwrap_or_default()
            .iter()
            .filter_map(OptionValue::as_str)
            .collect()
    }

    /// Whether the option holds a truthy value: `true`, a non-empty string
    /// or a non-empty list.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(OptionValue::is_truthy)
    }

    /// The conversion failure recorded for a name, if any.
    pub fn failure(&self, name: &str) -> Option<&ConversionError> {
        self.failures.get(name)
    }

    /// All recorded conversion failures, by name.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ConversionError)> {
        self.failures
            .iter()
            .map(|(name, error)| (name.as_str(), error))
    }

    /// Resolved names and values, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Turns the first recorded conversion failure into an error.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError`] naming the option that failed.
    pub fn strict(self) -> Result<Self, OptionError> {
        match self.failures.iter().next() {
            Some((name, source)) => Err(OptionError {
                name: name.clone(),
                source: source.clone(),
            }),
            None => Ok(self),
        }
    }
}

impl Serialize for ResolvedOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}
