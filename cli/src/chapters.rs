//! Completeness check of manga chapter folders, for `manga-check`.
//!
//! Each entry of the root folder is a chapter holding numbered page images.
//! A chapter is complete when it holds at least as many distinct page
//! numbers as its highest page number, so `1.jpg 2.jpg 3.jpg` passes and
//! `1.jpg 3.jpg` does not. The first digit run of a file stem is its page
//! number; an image without one makes the chapter incomplete.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::natural::natural_cmp;

/// Extensions counted as page images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff", "avif",
];

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("static regex must compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterStatus {
    Complete,
    Incomplete,
    /// The entry could not be read as a folder
    Unreadable,
}

/// Outcome for one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterCheck {
    pub name: String,
    pub status: ChapterStatus,
}

impl fmt::Display for ChapterCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.status {
            ChapterStatus::Complete => "Complete",
            ChapterStatus::Incomplete => "Incomplete",
            ChapterStatus::Unreadable => "Error",
        };
        write!(f, "{label}: {}", self.name)
    }
}

/// Checks every entry of `root`, in natural order of the names.
pub fn check_chapters(root: &Path) -> Result<Vec<ChapterCheck>> {
    let mut names: Vec<String> = fs::read_dir(root)?
        .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    names.sort_by(|a, b| natural_cmp(a, b));

    Ok(names
        .into_iter()
        .map(|name| {
            let status = chapter_status(&root.join(&name));
            debug!(chapter = %name, ?status, "Checked chapter");
            ChapterCheck { name, status }
        })
        .collect())
}

/// Status of a single chapter folder.
pub fn chapter_status(chapter: &Path) -> ChapterStatus {
    let Ok(entries) = fs::read_dir(chapter) else {
        return ChapterStatus::Unreadable;
    };

    let mut pages = HashSet::new();
    for entry in entries {
        let Ok(entry) = entry else {
            return ChapterStatus::Unreadable;
        };
        let path = entry.path();
        if !is_image(&path) {
            continue;
        }
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        match page_number(&stem) {
            Some(number) => {
                pages.insert(number);
            }
            None => return ChapterStatus::Incomplete,
        }
    }

    let highest = pages.iter().copied().max().unwrap_or(0);
    if u64::try_from(pages.len()).unwrap_or(u64::MAX) >= highest {
        ChapterStatus::Complete
    } else {
        ChapterStatus::Incomplete
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// First digit run of `stem`; saturates on overflow.
fn page_number(stem: &str) -> Option<u64> {
    DIGITS_RE
        .find(stem)
        .map(|digits| digits.as_str().parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(root: &Path, name: &str, files: &[&str]) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for file in files {
            fs::write(dir.join(file), "").unwrap();
        }
    }

    #[test]
    fn test_page_number_takes_first_digit_run() {
        assert_eq!(page_number("page_012_v2"), Some(12));
        assert_eq!(page_number("cover"), None);
        assert_eq!(page_number("99999999999999999999999"), Some(u64::MAX));
    }

    #[test]
    fn test_complete_and_gapped_chapters() {
        let dir = tempfile::tempdir().unwrap();
        chapter(dir.path(), "full", &["1.jpg", "2.PNG", "03.webp", "notes.txt"]);
        chapter(dir.path(), "gap", &["1.jpg", "3.jpg"]);
        chapter(dir.path(), "zero", &["0.jpg", "1.jpg"]);

        assert_eq!(chapter_status(&dir.path().join("full")), ChapterStatus::Complete);
        assert_eq!(chapter_status(&dir.path().join("gap")), ChapterStatus::Incomplete);
        assert_eq!(chapter_status(&dir.path().join("zero")), ChapterStatus::Complete);
    }

    #[test]
    fn test_duplicate_numbers_count_once() {
        let dir = tempfile::tempdir().unwrap();
        chapter(dir.path(), "dup", &["1.jpg", "1.png", "3.jpg"]);
        assert_eq!(chapter_status(&dir.path().join("dup")), ChapterStatus::Incomplete);
    }

    #[test]
    fn test_unnumbered_image_makes_chapter_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        chapter(dir.path(), "cover", &["1.jpg", "cover.jpg"]);
        assert_eq!(chapter_status(&dir.path().join("cover")), ChapterStatus::Incomplete);
    }

    #[test]
    fn test_empty_chapter_is_complete() {
        let dir = tempfile::tempdir().unwrap();
        chapter(dir.path(), "empty", &[]);
        assert_eq!(chapter_status(&dir.path().join("empty")), ChapterStatus::Complete);
    }

    #[test]
    fn test_check_chapters_sorts_and_flags_files() {
        let dir = tempfile::tempdir().unwrap();
        chapter(dir.path(), "ch10", &["1.jpg"]);
        chapter(dir.path(), "ch2", &["2.jpg"]);
        fs::write(dir.path().join("info.txt"), "").unwrap();

        let lines: Vec<String> = check_chapters(dir.path())
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            lines,
            vec!["Incomplete: ch2", "Complete: ch10", "Error: info.txt"]
        );
    }
}
