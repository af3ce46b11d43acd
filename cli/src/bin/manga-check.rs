use filekit_cli::{
    ChapterStatus, Result, TOOL_VERSION, check_chapters, folder_option, init_tracing,
    target_folder,
};
use filekit_core::{
    OptionSpec, ResolvedOptions, SchemeDefinition, ValueType, fatal, parse_or_exit,
};

fn scheme() -> SchemeDefinition {
    SchemeDefinition::new()
        .with_version(TOOL_VERSION)
        .with_description("Check that every chapter folder of a manga holds all of its pages")
        .with_option(folder_option("Manga root folder, one sub-folder per chapter"))
        .with_option(
            OptionSpec::new("d", ValueType::BOOLEAN)
                .with_alias("detailed")
                .with_help("Also list complete and unreadable chapters (default true)")
                .with_default(true),
        )
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
    let detailed = options.get_bool("detailed").unwrap_or(true);

    for check in check_chapters(&folder)? {
        if detailed || check.status == ChapterStatus::Incomplete {
            println!("{check}");
        }
    }
    Ok(())
}
