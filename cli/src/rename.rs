//! Batch renaming of the entries of a folder.
//!
//! [`rename_files`] backs `files-rename` and [`rename_dirs`] backs
//! `dirs-rename`. Both work in two steps: plan every new name, then apply
//! the plan unless running dry. Planning tracks the names the folder will
//! hold after each earlier rename, so a dry run reports the same outcome as
//! a real one. An entry that cannot be renamed is reported as failed and
//! does not stop the others. An existing entry is never overwritten.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::Result;
use crate::natural::natural_cmp;
use crate::pattern::{NamePattern, replace_roman};

/// Width of the zero-padded sequence names.
pub const SEQUENCE_WIDTH: usize = 8;

/// How `files-rename` builds new names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenameMode {
    /// 1-based position in natural order: `00000001.jpg`
    #[default]
    Sequence,
    /// Upper-case SHA-256 of the file content
    Hash,
}

/// One planned rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Result of a batch rename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// Renames performed, or planned when running dry
    pub renamed: Vec<Rename>,
    /// Entries that could not be renamed
    pub failed: Vec<PathBuf>,
    pub dry_run: bool,
}

impl fmt::Display for RenameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rename in &self.renamed {
            writeln!(f, "Old name: {}", rename.from.display())?;
            writeln!(f, "New name: {}", rename.to.display())?;
            writeln!(f)?;
        }
        if !self.failed.is_empty() {
            writeln!(f, "Failed:")?;
            for path in &self.failed {
                writeln!(f, "    {}", path.display())?;
            }
        }
        if self.dry_run {
            writeln!(f, "Dry run: no changes were made")?;
        }
        Ok(())
    }
}

/// Renames every file directly inside `folder`, keeping extensions.
///
/// Files are processed in natural order of their names.
pub fn rename_files(folder: &Path, mode: RenameMode, dry_run: bool) -> Result<RenameReport> {
    let names = sorted_entries(folder, false)?;
    let mut taken = entry_paths(folder)?;
    let mut report = RenameReport {
        dry_run,
        ..RenameReport::default()
    };

    for (index, name) in names.iter().enumerate() {
        let from = folder.join(name);
        let stem = match mode {
            RenameMode::Sequence => sequence_name(index + 1),
            RenameMode::Hash => match hash_name(&from) {
                Ok(hash) => hash,
                Err(err) => {
                    warn!(path = %from.display(), %err, "Could not hash file");
                    report.failed.push(from);
                    continue;
                }
            },
        };
        let to = folder.join(format!("{stem}{}", extension_suffix(&from)));
        plan(Rename { from, to }, &mut taken, &mut report);
    }
    Ok(apply(report))
}

/// Renames every sub-directory of `folder` after `pattern`.
///
/// Directories are processed in natural order; with `roman`, roman-numeral
/// words in their names compare by value (`Vol.IX` before `Vol.X`).
pub fn rename_dirs(
    folder: &Path,
    pattern: &NamePattern,
    roman: bool,
    dry_run: bool,
) -> Result<RenameReport> {
    let mut names = sorted_entries(folder, true)?;
    if roman {
        names.sort_by(|a, b| natural_cmp(&replace_roman(a), &replace_roman(b)));
    }
    let mut taken = entry_paths(folder)?;
    let mut report = RenameReport {
        dry_run,
        ..RenameReport::default()
    };

    for (index, name) in names.iter().enumerate() {
        let from = folder.join(name);
        let to = folder.join(pattern.name_for(index));
        plan(Rename { from, to }, &mut taken, &mut report);
    }
    Ok(apply(report))
}

/// Zero-padded 1-based sequence name.
pub fn sequence_name(position: usize) -> String {
    format!("{position:0width$}", width = SEQUENCE_WIDTH)
}

/// Upper-case hex SHA-256 of a file's content.
pub fn hash_name(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(format!("{:X}", Sha256::digest(&bytes)))
}

fn extension_suffix(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Naturally sorted names of the files (or directories) in `folder`.
fn sorted_entries(folder: &Path, dirs: bool) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() == dirs {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort_by(|a, b| natural_cmp(a, b));
    Ok(names)
}

/// Paths of every entry in `folder`, files and directories alike.
fn entry_paths(folder: &Path) -> Result<HashSet<PathBuf>> {
    let mut paths = HashSet::new();
    for entry in fs::read_dir(folder)? {
        paths.insert(entry?.path());
    }
    Ok(paths)
}

/// Adds `rename` to the plan unless its target is taken.
///
/// `taken` holds the names the folder contains once every rename planned so
/// far has been applied in order.
fn plan(rename: Rename, taken: &mut HashSet<PathBuf>, report: &mut RenameReport) {
    if rename.from == rename.to {
        return;
    }
    if taken.contains(&rename.to) {
        warn!(from = %rename.from.display(), to = %rename.to.display(), "Target already exists");
        report.failed.push(rename.from);
        return;
    }
    taken.remove(&rename.from);
    taken.insert(rename.to.clone());
    report.renamed.push(rename);
}

/// Performs the planned renames in order, unless running dry.
fn apply(mut report: RenameReport) -> RenameReport {
    if report.dry_run {
        return report;
    }
    for rename in std::mem::take(&mut report.renamed) {
        // An earlier failure may leave a planned target still in place.
        let result = if rename.to.symlink_metadata().is_ok() {
            Err(std::io::Error::from(std::io::ErrorKind::AlreadyExists))
        } else {
            fs::rename(&rename.from, &rename.to)
        };
        match result {
            Ok(()) => {
                info!(from = %rename.from.display(), to = %rename.to.display(), "Renamed");
                report.renamed.push(rename);
            }
            Err(err) => {
                warn!(from = %rename.from.display(), %err, "Rename failed");
                report.failed.push(rename.from);
            }
        }
    }
    report
}
