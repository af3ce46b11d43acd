use filekit_cli::{
    DEFAULT_KEEP, Result, TOOL_VERSION, ToolError, dry_run_option, folder_option, init_tracing,
    prune, target_folder,
};
use filekit_core::{
    OptionSpec, ResolvedOptions, SchemeDefinition, ValueType, fatal, parse_or_exit,
};

fn scheme() -> SchemeDefinition {
    SchemeDefinition::new()
        .with_version(TOOL_VERSION)
        .with_description("Keep the most recently modified files of a folder and delete the rest")
        .with_option(folder_option("Target folder"))
        .with_option(
            OptionSpec::new("c", ValueType::INTEGER)
                .with_alias("count")
                .with_help("Number of files to keep (default 5)")
                .with_symbol("count")
                .with_default(DEFAULT_KEEP),
        )
        .with_option(dry_run_option("List the files that would be deleted without deleting them"))
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
    let folder = target_folder(options)?;
    let count = options.get_i64("count").unwrap_or(DEFAULT_KEEP);
    let keep = usize::try_from(count).map_err(|_| ToolError::InvalidNumber {
        name: "count",
        value: count,
    })?;
    let dry_run = options.get_bool("dry-run").unwrap_or(false);

    print!("{}", prune(&folder, keep, dry_run)?);
    Ok(())
}
