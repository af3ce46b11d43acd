//! Finding files modified after a point in time, for `filter-by-date`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::error::{Result, ToolError};
use crate::natural::natural_cmp;

/// Date format used in the tool output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A file newer than the cut-off date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentFile {
    pub path: PathBuf,
    /// Path below the searched folder
    pub relative: PathBuf,
    pub modified: DateTime<Local>,
}

/// Parses a cut-off date given on the command line.
///
/// Accepts RFC 3339 (`2024-03-01T08:00:00+02:00`) and, in local time,
/// `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD` (midnight).
///
/// ```
/// use chrono::{Datelike, Timelike};
/// use filekit_cli::parse_date;
///
/// let date = parse_date("2024-03-01").unwrap();
/// assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 1));
/// assert_eq!(date.hour(), 0);
/// assert!(parse_date("yesterday").is_err());
/// ```
pub fn parse_date(text: &str) -> Result<DateTime<Local>> {
    let text = text.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Ok(date.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });
    naive
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .ok_or_else(|| ToolError::InvalidDate(text.to_string()))
}

/// Files below `root` modified strictly after `since`.
///
/// The walk is depth-first with each directory naturally sorted, so the
/// result reads like a `file-list` listing. Symbolic links to directories
/// are not followed.
pub fn files_modified_after(root: &Path, since: DateTime<Local>) -> Result<Vec<RecentFile>> {
    let mut files = Vec::new();
    walk(root, root, since, &mut files)?;
    debug!(found = files.len(), %since, "Filtered files by date");
    Ok(files)
}

fn walk(
    root: &Path,
    dir: &Path,
    since: DateTime<Local>,
    files: &mut Vec<RecentFile>,
) -> Result<()> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    names.sort_by(|a, b| natural_cmp(a, b));

    for name in names {
        let path = dir.join(&name);
        if fs::symlink_metadata(&path)?.is_dir() {
            walk(root, &path, since, files)?;
            continue;
        }
        let modified: DateTime<Local> = fs::metadata(&path)?.modified()?.into();
        if modified > since {
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            files.push(RecentFile {
                path,
                relative,
                modified,
            });
        }
    }
    Ok(())
}

/// Copies `file` to the same relative path below `output` and returns the
/// target. Missing directories are created.
pub fn copy_recent(file: &RecentFile, output: &Path) -> Result<PathBuf> {
    let target = std::path::absolute(output)?.join(&file.relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&file.path, &target)?;
    info!(from = %file.path.display(), to = %target.display(), "Copied file");
    Ok(target)
}
