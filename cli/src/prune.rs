//! Keeping only the newest files of a folder, for `prune-files`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Number of files kept when `--count` is not given.
pub const DEFAULT_KEEP: i64 = 5;

/// A file selected for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedFile {
    pub path: PathBuf,
    pub modified: DateTime<Local>,
}

/// Result of a prune run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Files deleted, or selected for deletion when running dry
    pub pruned: Vec<PrunedFile>,
    /// Files that could not be deleted
    pub failed: Vec<PathBuf>,
    pub dry_run: bool,
}

impl fmt::Display for PruneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "Would delete" } else { "Deleted" };
        for file in &self.pruned {
            writeln!(
                f,
                "{verb} file: {} (modified {})",
                file.path.display(),
                file.modified.format("%Y-%m-%d %H:%M:%S")
            )?;
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

/// Deletes all but the `keep` most recently modified files in `folder`.
///
/// Only regular files directly inside `folder` are considered. Files with
/// the same modification time are ordered by name. With `dry_run` nothing
/// is deleted, but the selection is the same. A file that cannot be
/// deleted is reported as failed and the others are still deleted.
pub fn prune(folder: &Path, keep: usize, dry_run: bool) -> Result<PruneReport> {
    let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if metadata.is_file() {
            files.push((metadata.modified()?, entry.path()));
        }
    }
    files.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    debug!(total = files.len(), keep, "Collected files to prune");

    Ok(delete_files(files.into_iter().skip(keep), dry_run))
}

fn delete_files(
    files: impl IntoIterator<Item = (SystemTime, PathBuf)>,
    dry_run: bool,
) -> PruneReport {
    let mut report = PruneReport {
        dry_run,
        ..PruneReport::default()
    };
    for (modified, path) in files {
        if !dry_run {
            if let Err(err) = fs::remove_file(&path) {
                warn!(path = %path.display(), %err, "Could not delete file");
                report.failed.push(path);
                continue;
            }
            info!(path = %path.display(), "Deleted file");
        }
        report.pruned.push(PrunedFile {
            path,
            modified: DateTime::from(modified),
        });
    }
    report
}
