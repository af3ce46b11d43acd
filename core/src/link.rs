//! Scheme linking: one lookup table for short keys and aliases.

use std::collections::HashMap;

use crate::error::ConversionError;
use crate::types::{Meta, OptionSpec, SchemeDefinition, ValueType};

/// An option as seen through the linked scheme.
#[derive(Debug, Clone)]
pub struct LinkedOption<'a> {
    /// The declared option
    pub spec: &'a OptionSpec,
    /// Parsed type; an unsupported name only fails this option
    pub value_type: Result<ValueType, ConversionError>,
}

impl LinkedOption<'_> {
    /// Short key that owns this entry, also when reached through its alias.
    pub fn short_key(&self) -> &str {
        &self.spec.key
    }

    /// Names a resolved value is stored under: the short key, then the alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.spec.key.as_str()).chain(self.spec.alias.as_deref())
    }
}

/// Read-only view of a scheme keyed by both short key and alias.
///
/// Built once per parse and dropped when parsing completes.
///
/// # Examples
///
/// ```
/// use filekit_core::*;
///
/// let scheme = SchemeDefinition::new()
///     .with_option(OptionSpec::new("f", ValueType::STRING).with_alias("folder"));
/// let linked = LinkedScheme::link(&scheme);
///
/// assert_eq!(linked.by_alias("folder").unwrap().short_key(), "f");
/// assert!(linked.by_short("f").is_some());
/// assert!(linked.by_short("folder").is_none());
/// ```
#[derive(Debug)]
pub struct LinkedScheme<'a> {
    entries: Vec<LinkedOption<'a>>,
    shorts: HashMap<&'a str, usize>,
    aliases: HashMap<&'a str, usize>,
    scheme: &'a SchemeDefinition,
}

impl<'a> LinkedScheme<'a> {
    /// Links a scheme. Type names are parsed here, once per option.
    pub fn link(scheme: &'a SchemeDefinition) -> Self {
        let mut entries = Vec::with_capacity(scheme.options.len());
        let mut shorts = HashMap::new();
        let mut aliases = HashMap::new();

        for (index, spec) in scheme.options.iter().enumerate() {
            entries.push(LinkedOption {
                spec,
                value_type: spec.value_type(),
            });
            shorts.insert(spec.key.as_str(), index);
            if let Some(alias) = spec.alias.as_deref() {
                aliases.insert(alias, index);
            }
        }

        Self {
            entries,
            shorts,
            aliases,
            scheme,
        }
    }

    /// Looks up an option by its short key (the `-key` form).
    pub fn by_short(&self, key: &str) -> Option<&LinkedOption<'a>> {
        self.shorts.get(key).map(|&index| &self.entries[index])
    }

    /// Looks up an option by its alias (the `--alias` form).
    pub fn by_alias(&self, alias: &str) -> Option<&LinkedOption<'a>> {
        self.aliases.get(alias).map(|&index| &self.entries[index])
    }

    /// Options in declaration order.
    pub fn options(&self) -> &[LinkedOption<'a>] {
        &self.entries
    }

    pub fn meta(&self) -> &'a Meta {
        &self.scheme.meta
    }

    /// The scheme this view was linked from.
    pub fn scheme(&self) -> &'a SchemeDefinition {
        self.scheme
    }
}
