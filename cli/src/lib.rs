//! File housekeeping tools built on `filekit-core` schemes.
//!
//! Each binary declares its options as a [`filekit_core::SchemeDefinition`],
//! parses the process arguments with [`filekit_core::parse_or_exit`] and
//! hands the resolved options to one of the operations below:
//!
//! - [`list_tree`] / [`write_listing`] for `file-list`
//! - [`prune`] for `prune-files`
//! - [`rename_files`] for `files-rename`
//! - [`rename_dirs`] with a [`NamePattern`] for `dirs-rename`
//! - [`files_modified_after`] / [`copy_recent`] for `filter-by-date`
//! - [`check_chapters`] for `manga-check`

mod chapters;
mod error;
mod listing;
mod natural;
mod pattern;
mod prune;
mod recent;
mod rename;
mod tool;

pub use chapters::{ChapterCheck, ChapterStatus, IMAGE_EXTENSIONS, chapter_status, check_chapters};
pub use error::{Result, ToolError};
pub use listing::{LEVEL_INDENT, list_tree, write_listing};
pub use natural::{natural_cmp, natural_sort};
pub use pattern::{DEFAULT_PATTERN, NamePattern, replace_roman};
pub use prune::{DEFAULT_KEEP, PruneReport, PrunedFile, prune};
pub use recent::{DATE_FORMAT, RecentFile, copy_recent, files_modified_after, parse_date};
pub use rename::{
    Rename, RenameMode, RenameReport, SEQUENCE_WIDTH, hash_name, rename_dirs, rename_files,
    sequence_name,
};
pub use tool::{TOOL_VERSION, dry_run_option, folder_option, init_tracing, target_folder};
