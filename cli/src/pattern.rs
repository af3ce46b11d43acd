//! Naming templates and roman-numeral aware sort keys for `dirs-rename`.
//!
//! A template contains one or more `${...}` placeholders that are replaced
//! by a running number. The first placeholder may carry `;`-separated
//! parameters, case-insensitive:
//!
//! - `PAD=n` zero-pads the number to `n` characters (default 2, at most 255)
//! - `START=n` is the number given to the first entry (default 1)
//!
//! ```
//! use filekit_cli::NamePattern;
//!
//! let pattern = NamePattern::parse("Vol.${PAD=3;START=0}");
//! assert_eq!(pattern.name_for(0), "Vol.000");
//! assert_eq!(pattern.name_for(12), "Vol.012");
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use filekit_core::{ScalarType, convert_scalar};
use regex::{Captures, NoExpand, Regex};

/// Template used when `--pattern` is not given.
pub const DEFAULT_PATTERN: &str = "Vol.${PAD=2;START=1}";

const DEFAULT_PAD: usize = 2;
const DEFAULT_START: i64 = 1;
/// Longest file name most filesystems accept.
const MAX_PAD: usize = 255;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]*\}").expect("static regex must compile"));

static ROMAN_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[IVXLCDM]+\b").expect("static regex must compile"));

static VALID_ROMAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^M*(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$")
        .expect("static regex must compile")
});

/// A parsed naming template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    template: String,
    pad: usize,
    start: i64,
}

impl NamePattern {
    /// Parses a template.
    ///
    /// An empty template becomes `${}`, and a template without placeholder
    /// gets `_${}` appended. Unknown parameters and values without a
    /// numeric prefix are ignored.
    pub fn parse(pattern: &str) -> Self {
        let template = if pattern.is_empty() {
            "${}".to_string()
        } else if !PLACEHOLDER_RE.is_match(pattern) {
            format!("{pattern}_${{}}")
        } else {
            pattern.to_string()
        };

        let mut pad = DEFAULT_PAD;
        let mut start = DEFAULT_START;
        if let Some(placeholder) = PLACEHOLDER_RE.find(&template) {
            let inner = placeholder.as_str();
            let params = inner[2..inner.len() - 1].to_lowercase();
            for param in params.split(';') {
                let Some((key, value)) = param.split_once('=') else {
                    continue;
                };
                let Some(number) = leading_int(value) else {
                    continue;
                };
                match key.trim() {
                    "pad" => pad = usize::try_from(number).unwrap_or(0).min(MAX_PAD),
                    "start" => start = number,
                    _ => {}
                }
            }
        }

        Self {
            template,
            pad,
            start,
        }
    }

    /// Name for the entry at zero-based `index`.
    pub fn name_for(&self, index: usize) -> String {
        let number = i64::try_from(index)
            .unwrap_or(i64::MAX)
            .saturating_add(self.start);
        let digits = number.to_string();
        let zeros = "0".repeat(self.pad.saturating_sub(digits.len()));
        let formatted = format!("{zeros}{digits}");
        PLACEHOLDER_RE
            .replace_all(&self.template, NoExpand(&formatted))
            .into_owned()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn pad(&self) -> usize {
        self.pad
    }

    pub fn start(&self) -> i64 {
        self.start
    }
}

impl Default for NamePattern {
    fn default() -> Self {
        Self::parse(DEFAULT_PATTERN)
    }
}

fn leading_int(value: &str) -> Option<i64> {
    convert_scalar(value, ScalarType::Integer)
        .ok()
        .and_then(|value| value.as_i64())
}

/// Replaces each valid roman-numeral word with its arabic value.
///
/// Words made of roman letters that do not form a valid numeral are kept.
///
/// ```
/// use filekit_cli::replace_roman;
///
/// assert_eq!(replace_roman("Part IV - ix"), "Part 4 - 9");
/// assert_eq!(replace_roman("Vol.IIII"), "Vol.IIII");
/// ```
pub fn replace_roman(name: &str) -> Cow<'_, str> {
    ROMAN_WORD_RE.replace_all(name, |caps: &Captures<'_>| {
        let word = &caps[0];
        let upper = word.to_uppercase();
        if VALID_ROMAN_RE.is_match(&upper) {
            roman_to_arabic(&upper).to_string()
        } else {
            word.to_string()
        }
    })
}

/// Value of an upper-case roman numeral; assumes a valid numeral.
fn roman_to_arabic(numeral: &str) -> u64 {
    let mut total: u64 = 0;
    let mut largest = 0;
    for ch in numeral.chars().rev() {
        let value = match ch {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => 0,
        };
        if value < largest {
            total = total.saturating_sub(value);
        } else {
            total += value;
            largest = value;
        }
    }
    total
}
