//! Scheme validation.
//!
//! Catches structural mistakes in a scheme before any argument is parsed:
//! empty keys, names that shadow `-h/--help` or `-v/--version`, keys and
//! aliases that collide, and an isolated bucket name that shadows an
//! option.
//!
//! # Examples
//!
//! ```
//! use filekit_core::*;
//!
//! let scheme = SchemeDefinition::new()
//!     .with_option(OptionSpec::new("f", ValueType::STRING).with_alias("folder"));
//! assert!(validate_scheme(&scheme).is_empty());
//!
//! // Invalid: `-h` is reserved for help
//! let bad = SchemeDefinition::new().with_option(OptionSpec::new("h", ValueType::BOOLEAN));
//! assert!(!validate_scheme(&bad).is_empty());
//! ```

use std::collections::HashSet;

use crate::error::SchemeError;
use crate::types::{RESERVED_NAMES, SchemeDefinition};

/// Validates a scheme definition.
///
/// Returns every problem found, in declaration order; an empty list means
/// the scheme is valid.
pub fn validate_scheme(scheme: &SchemeDefinition) -> Vec<SchemeError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for option in &scheme.options {
        let key = (!option.key.trim().is_empty()).then_some(option.key.as_str());
        if key.is_none() {
            errors.push(SchemeError::EmptyKey);
        }

        for name in key.into_iter().chain(option.alias.as_deref()) {
            if RESERVED_NAMES.contains(&name) {
                errors.push(SchemeError::ReservedKey(name.to_string()));
            } else if !seen.insert(name) {
                errors.push(SchemeError::DuplicateName(name.to_string()));
            }
        }
    }

    if let Some(isolated) = scheme.meta.isolated.as_deref() {
        if seen.contains(isolated) {
            errors.push(SchemeError::IsolatedNameCollision(isolated.to_string()));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use crate::types::{OptionSpec, ValueType};

    use super::*;

    #[test]
    fn test_validate_scheme_rejects_reserved_keys() {
        for name in ["h", "v"] {
            let scheme =
                SchemeDefinition::new().with_option(OptionSpec::new(name, ValueType::BOOLEAN));
            let errors = validate_scheme(&scheme);
            assert!(
                matches!(errors.as_slice(), [SchemeError::ReservedKey(n)] if n == name),
                "{errors:?}"
            );
        }
    }

    #[test]
    fn test_validate_scheme_rejects_reserved_alias() {
        let scheme = SchemeDefinition::new()
            .with_option(OptionSpec::new("V", ValueType::BOOLEAN).with_alias("version"));
        let errors = validate_scheme(&scheme);
        assert!(matches!(errors.as_slice(), [SchemeError::ReservedKey(n)] if n == "version"));
    }

    #[test]
    fn test_validate_scheme_rejects_alias_colliding_with_key() {
        let scheme = SchemeDefinition::new()
            .with_option(OptionSpec::new("o", ValueType::STRING).with_alias("out"))
            .with_option(OptionSpec::new("x", ValueType::STRING).with_alias("o"));
        let errors = validate_scheme(&scheme);
        assert!(matches!(errors.as_slice(), [SchemeError::DuplicateName(n)] if n == "o"));
    }

    #[test]
    fn test_validate_scheme_rejects_isolated_collision() {
        let scheme = SchemeDefinition::new()
            .with_isolated("folder")
            .with_option(OptionSpec::new("f", ValueType::STRING).with_alias("folder"));
        let errors = validate_scheme(&scheme);
        assert!(matches!(
            errors.as_slice(),
            [SchemeError::IsolatedNameCollision(n)] if n == "folder"
        ));
    }

    #[test]
    fn test_validate_scheme_rejects_empty_key() {
        let scheme = SchemeDefinition::new().with_option(OptionSpec::new(" ", ValueType::STRING));
        assert!(matches!(
            validate_scheme(&scheme).as_slice(),
            [SchemeError::EmptyKey]
        ));
    }

    #[test]
    fn test_validate_scheme_reports_every_problem() {
        let scheme = SchemeDefinition::new()
            .with_isolated("out")
            .with_option(OptionSpec::new("h", ValueType::BOOLEAN).with_alias("out"))
            .with_option(OptionSpec::new("", ValueType::STRING))
            .with_option(OptionSpec::new("o", ValueType::STRING).with_alias("out"));
        let errors = validate_scheme(&scheme);

        assert!(
            matches!(
                errors.as_slice(),
                [
                    SchemeError::ReservedKey(reserved),
                    SchemeError::EmptyKey,
                    SchemeError::DuplicateName(duplicate),
                    SchemeError::IsolatedNameCollision(isolated),
                ] if reserved == "h" && duplicate == "out" && isolated == "out"
            ),
            "{errors:?}"
        );
    }

    #[test]
    fn test_validate_scheme_accepts_two_letter_keys() {
        let scheme = SchemeDefinition::new()
            .with_isolated("rest")
            .with_option(OptionSpec::new("ra", ValueType::STRING).with_alias("rearrange"))
            .with_option(OptionSpec::new("rp", ValueType::STRING).with_alias("replace"));
        assert!(validate_scheme(&scheme).is_empty());
    }
}
