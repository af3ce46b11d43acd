//! Mutually exclusive modes.
//!
//! Tools with several modes (e.g. rename by hash or by sequence) accept at
//! most one of them per invocation. These helpers only detect the conflict;
//! the tool reports it and picks the exit status.

use std::fmt;
use std::process;

use thiserror::Error;

use crate::options::ResolvedOptions;

/// More than one exclusive mode was selected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("redundant arguments{}", list_modes(.modes))]
pub struct ModeConflict {
    /// Names of the selected modes, when known
    pub modes: Vec<String>,
    /// How many modes were selected
    pub count: usize,
}

fn list_modes(modes: &[String]) -> String {
    if modes.is_empty() {
        String::new()
    } else {
        format!(": {}", modes.join(", "))
    }
}

/// Fails when more than one of `modes` is active.
///
/// # Examples
///
/// ```
/// use filekit_core::only_single_mode;
///
/// assert!(only_single_mode(&[false, true, false]).is_ok());
/// assert!(only_single_mode(&[]).is_ok());
/// assert_eq!(only_single_mode(&[true, false, true]).unwrap_err().count, 2);
/// ```
pub fn only_single_mode(modes: &[bool]) -> Result<(), ModeConflict> {
    let count = modes.iter().filter(|active| **active).count();
    if count > 1 {
        return Err(ModeConflict {
            modes: Vec::new(),
            count,
        });
    }
    Ok(())
}

/// Fails when more than one of the named options is set.
///
/// An option counts as set when it holds `true`, a non-empty string or a
/// non-empty list.
pub fn ensure_single_mode(options: &ResolvedOptions, names: &[&str]) -> Result<(), ModeConflict> {
    let modes: Vec<String> = names
        .iter()
        .filter(|name| options.is_set(name))
        .map(|name| name.to_string())
        .collect();
    if modes.len() > 1 {
        return Err(ModeConflict {
            count: modes.len(),
            modes,
        });
    }
    Ok(())
}

/// Prints `fatal error - <message>` to stderr and exits with status 1.
pub fn fatal(message: impl fmt::Display) -> ! {
    eprintln!("fatal error - {message}");
    process::exit(1);
}
