//! Folder tree listings for `file-list`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::natural::natural_cmp;

/// Indentation added per nesting level (U+3000 ideographic space).
pub const LEVEL_INDENT: char = '\u{3000}';

/// Lists `root` depth-first, one entry per line.
///
/// Entries of each directory are naturally sorted and indented by one
/// [`LEVEL_INDENT`] per level below `root`. Symbolic links are listed but
/// not followed.
pub fn list_tree(root: &Path) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    walk(root, 0, &mut lines)?;
    Ok(lines)
}

fn walk(dir: &Path, depth: usize, lines: &mut Vec<String>) -> Result<()> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    names.sort_by(|a, b| natural_cmp(a, b));

    let indent: String = std::iter::repeat_n(LEVEL_INDENT, depth).collect();
    for name in names {
        let path = dir.join(&name);
        lines.push(format!("{indent}{name}"));
        if fs::symlink_metadata(&path)?.is_dir() {
            walk(&path, depth + 1, lines)?;
        }
    }
    Ok(())
}

/// Writes the listing of `root` to `<output_dir>/<root name>.txt` and
/// returns the written path. `output_dir` is created when missing.
pub fn write_listing(root: &Path, output_dir: &Path) -> Result<PathBuf> {
    let listing = list_tree(root)?.join("\n");
    let name = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string());

    fs::create_dir_all(output_dir)?;
    let path = fs::canonicalize(output_dir)?.join(format!("{name}.txt"));
    fs::write(&path, listing)?;
    info!(path = %path.display(), "Wrote file listing");
    Ok(path)
}
