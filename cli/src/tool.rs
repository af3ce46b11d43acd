//! Plumbing shared by every binary: logging setup and common options.

use std::fs;
use std::path::PathBuf;

use filekit_core::{OptionSpec, ResolvedOptions, ValueType};
use tracing_subscriber::EnvFilter;

use crate::error::{Result, ToolError};

/// Version reported by every tool.
pub const TOOL_VERSION: &str = "0.0.1";

/// Installs the stderr log subscriber, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// The `-f/--folder` option every tool takes.
pub fn folder_option(help: &str) -> OptionSpec {
    OptionSpec::new("f", ValueType::STRING)
        .with_alias("folder")
        .with_help(help)
        .with_symbol("folder")
}

/// The `-D/--dry-run` option.
pub fn dry_run_option(help: &str) -> OptionSpec {
    OptionSpec::new("D", ValueType::BOOLEAN)
        .with_alias("dry-run")
        .with_help(help)
        .with_default(false)
}

/// Resolves `--folder` to an absolute directory path.
///
/// # Errors
///
/// Fails when the option is missing or empty, or when the path does not
/// name an existing directory.
pub fn target_folder(options: &ResolvedOptions) -> Result<PathBuf> {
    let folder = options
        .get_str("folder")
        .filter(|folder| !folder.is_empty())
        .ok_or(ToolError::MissingFolder)?;
    let path = fs::canonicalize(folder).map_err(|_| ToolError::NotADirectory(folder.into()))?;
    if !path.is_dir() {
        return Err(ToolError::NotADirectory(path));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use filekit_core::{Outcome, SchemeDefinition, parse_args};

    use super::*;

    fn resolve(tokens: &[&str]) -> ResolvedOptions {
        let scheme = SchemeDefinition::new()
            .with_option(folder_option("Target folder"))
            .with_option(dry_run_option("Dry run"));
        match parse_args(&scheme, "tool", tokens).unwrap() {
            Outcome::Options(options) => options,
            other => panic!("expected options, got {other:?}"),
        }
    }

    #[test]
    fn test_target_folder_requires_option() {
        let options = resolve(&["-D"]);
        assert!(matches!(target_folder(&options), Err(ToolError::MissingFolder)));

        let options = resolve(&["--folder="]);
        assert!(matches!(target_folder(&options), Err(ToolError::MissingFolder)));
    }

    #[test]
    fn test_target_folder_rejects_files_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();

        let options = resolve(&["-f", file.to_str().unwrap()]);
        assert!(matches!(target_folder(&options), Err(ToolError::NotADirectory(_))));

        let missing = dir.path().join("missing");
        let options = resolve(&["-f", missing.to_str().unwrap()]);
        assert!(matches!(target_folder(&options), Err(ToolError::NotADirectory(_))));
    }

    #[test]
    fn test_target_folder_is_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let options = resolve(&["--folder", dir.path().to_str().unwrap()]);
        let folder = target_folder(&options).unwrap();
        assert!(folder.is_absolute());
        assert_eq!(folder, fs::canonicalize(dir.path()).unwrap());
    }
}
