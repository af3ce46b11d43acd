use filekit_cli::{
    RenameMode, Result, TOOL_VERSION, dry_run_option, folder_option, init_tracing, rename_files,
    target_folder,
};
use filekit_core::{
    OptionSpec, ResolvedOptions, SchemeDefinition, ValueType, ensure_single_mode, fatal,
    parse_or_exit,
};

fn scheme() -> SchemeDefinition {
    SchemeDefinition::new()
        .with_version(TOOL_VERSION)
        .with_description("Rename every file of a folder, keeping extensions")
        .with_option(folder_option("Target folder"))
        .with_option(
            OptionSpec::new("H", ValueType::BOOLEAN)
                .with_alias("hash")
                .with_help("Rename to the upper-case SHA-256 of the file content"),
        )
        .with_option(
            OptionSpec::new("s", ValueType::BOOLEAN)
                .with_alias("sequence")
                .with_help("Rename to an 8-digit sequence number in natural order (default)"),
        )
        .with_option(dry_run_option("Print the new names without renaming"))
}

fn main() {
    init_tracing();

    let result = parse_or_exit(&scheme())
        .strict()
        .map_err(Into::into)
        .and_then(|options| run(&options));

    if let Err(err) = result {
        fatal(err);
    }
}

fn run(options: &ResolvedOptions) -> Result<()> {
    ensure_single_mode(options, &["hash", "sequence"])?;
    let folder = target_folder(options)?;

    let mode = if options.is_set("hash") {
        RenameMode::Hash
    } else {
        RenameMode::Sequence
    };
    let dry_run = options.get_bool("dry-run").unwrap_or(false);

    print!("{}", rename_files(&folder, mode, dry_run)?);
    Ok(())
}
