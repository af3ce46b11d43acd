//! Splitting raw command-line tokens into flag/value pairs.
//!
//! The tokenizer knows nothing about schemes. It makes one left-to-right
//! pass with a single pending-flag register:
//!
//! - `-k=value` / `--key=value` records the value immediately;
//! - a bare flag becomes pending; if another flag arrives first, the pending
//!   one is recorded as present without a value;
//! - a plain token is the value of the pending flag, or a positional
//!   argument when nothing is pending.

use tracing::debug;

/// Raw value recorded for a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// The flag appeared without a value.
    Present,
    /// The flag's value, from `flag=value` or the following token.
    Value(String),
}

/// Tokenizer output.
///
/// Flags keep first-seen order; a flag given twice keeps its position and
/// takes the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    entries: Vec<(String, RawValue)>,
    /// Positional tokens not consumed as flag values, in input order
    pub isolated: Vec<String>,
}

impl ParsedArgs {
    fn insert(&mut self, flag: String, value: RawValue) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == flag) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((flag, value)),
        }
    }

    /// Returns the raw value of a flag token such as `"-f"` or `"--folder"`.
    pub fn get(&self, flag: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == flag)
            .map(|(_, value)| value)
    }

    /// Checks whether any of the given flag tokens was supplied.
    pub fn contains_any(&self, flags: &[&str]) -> bool {
        flags.iter().any(|flag| self.get(flag).is_some())
    }

    /// Iterates flags in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries
            .iter()
            .map(|(flag, value)| (flag.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tokenizes arguments (program name already stripped).
///
/// # Examples
///
/// ```
/// use filekit_core::{RawValue, tokenize};
///
/// let parsed = tokenize(["a", "-f=x", "-D", "-o", "out", "b"]);
/// assert_eq!(parsed.get("-f"), Some(&RawValue::Value("x".into())));
/// assert_eq!(parsed.get("-D"), Some(&RawValue::Present));
/// assert_eq!(parsed.get("-o"), Some(&RawValue::Value("out".into())));
/// assert_eq!(parsed.isolated, vec!["a", "b"]);
/// ```
pub fn tokenize<I, S>(tokens: I) -> ParsedArgs
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedArgs::default();
    let mut pending: Option<String> = None;

    for token in tokens {
        let token = token.as_ref();
        if token.starts_with('-') {
            if let Some((flag, value)) = token.split_once('=') {
                parsed.insert(flag.to_string(), RawValue::Value(value.to_string()));
            } else if let Some(previous) = pending.replace(token.to_string()) {
                parsed.insert(previous, RawValue::Present);
            }
        } else if let Some(flag) = pending.take() {
            parsed.insert(flag, RawValue::Value(token.to_string()));
        } else {
            parsed.isolated.push(token.to_string());
        }
    }

    if let Some(flag) = pending {
        parsed.insert(flag, RawValue::Present);
    }

    debug!(
        flags = parsed.len(),
        isolated = parsed.isolated.len(),
        "Tokenized arguments"
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> RawValue {
        RawValue::Value(s.to_string())
    }

    #[test]
    fn test_equals_form_splits_once() {
        let parsed = tokenize(["--query=a=b"]);
        assert_eq!(parsed.get("--query"), Some(&value("a=b")));
    }

    #[test]
    fn test_equals_form_leaves_pending_flag_untouched() {
        let parsed = tokenize(["-o", "--list=[1]", "out"]);
        assert_eq!(parsed.get("--list"), Some(&value("[1]")));
        assert_eq!(parsed.get("-o"), Some(&value("out")));
        assert!(parsed.isolated.is_empty());
    }

    #[test]
    fn test_consecutive_bare_flags_become_present() {
        let parsed = tokenize(["-a", "-b", "-c"]);
        assert_eq!(parsed.get("-a"), Some(&RawValue::Present));
        assert_eq!(parsed.get("-b"), Some(&RawValue::Present));
        assert_eq!(parsed.get("-c"), Some(&RawValue::Present));
    }

    #[test]
    fn test_last_bare_flag_takes_following_value() {
        let parsed = tokenize(["-a", "-b", "value", "rest"]);
        assert_eq!(parsed.get("-a"), Some(&RawValue::Present));
        assert_eq!(parsed.get("-b"), Some(&value("value")));
        assert_eq!(parsed.isolated, vec!["rest"]);
    }

    #[test]
    fn test_repeated_flag_keeps_position_and_takes_later_value() {
        let parsed = tokenize(["-f=one", "-o=x", "-f=two"]);
        let order: Vec<&str> = parsed.iter().map(|(flag, _)| flag).collect();
        assert_eq!(order, vec!["-f", "-o"]);
        assert_eq!(parsed.get("-f"), Some(&value("two")));
    }

    #[test]
    fn test_empty_input() {
        let parsed = tokenize(Vec::<String>::new());
        assert!(parsed.is_empty());
        assert!(parsed.isolated.is_empty());
    }
}
