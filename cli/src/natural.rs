//! Natural ordering of file names.
//!
//! Digit runs compare by numeric value and letters compare without regard to
//! case, so `page2` sorts before `Page10`.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compares two names in natural order.
///
/// Names that only differ by case or by leading zeros fall back to plain
/// byte order, which keeps sorting deterministic.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use filekit_cli::natural_cmp;
///
/// assert_eq!(natural_cmp("page2", "Page10"), Ordering::Less);
/// assert_eq!(natural_cmp("b", "A"), Ordering::Greater);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    compare_chunks(a, b).then_with(|| a.cmp(b))
}

/// Sorts names in place in natural order.
pub fn natural_sort<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}

fn compare_chunks(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek(), right.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => (*l, *r),
        };

        let ord = if l.is_ascii_digit() && r.is_ascii_digit() {
            compare_numeric(&take_digits(&mut left), &take_digits(&mut right))
        } else {
            left.next();
            right.next();
            fold_case(l).cmp(&fold_case(r))
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(ch) = chars.next_if(char::is_ascii_digit) {
        digits.push(ch);
    }
    digits
}

/// Compares digit strings of any length by value.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn fold_case(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}
