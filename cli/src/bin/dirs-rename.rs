use filekit_cli::{
    DEFAULT_PATTERN, NamePattern, Result, TOOL_VERSION, dry_run_option, folder_option,
    init_tracing, rename_dirs, target_folder,
};
use filekit_core::{
    OptionSpec, ResolvedOptions, SchemeDefinition, ValueType, fatal, parse_or_exit,
};

fn scheme() -> SchemeDefinition {
    SchemeDefinition::new()
        .with_version(TOOL_VERSION)
        .with_description("Rename every sub-directory of a folder after a naming pattern")
        .with_option(folder_option("Target folder"))
        .with_option(
            OptionSpec::new("p", ValueType::STRING)
                .with_alias("pattern")
                .with_help(
                    "Naming pattern (default \"Vol.${PAD=2;START=1}\"). \
                     PAD is the zero-padded width, START the first number; \
                     quote the pattern with single quotes",
                )
                .with_symbol("pattern")
                .with_default(DEFAULT_PATTERN),
        )
        .with_option(
            OptionSpec::new("R", ValueType::BOOLEAN)
                .with_alias("roman")
                .with_help("Sort roman numerals by value (default true)")
                .with_symbol("roman")
                .with_default(true),
        )
        .with_option(dry_run_option("Print the new names without renaming (default false)"))
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
    let pattern = NamePattern::parse(options.get_str("pattern").unwrap_or(DEFAULT_PATTERN));
    let roman = options.get_bool("roman").unwrap_or(true);
    let dry_run = options.get_bool("dry-run").unwrap_or(false);

    print!("{}", rename_dirs(&folder, &pattern, roman, dry_run)?);
    Ok(())
}
