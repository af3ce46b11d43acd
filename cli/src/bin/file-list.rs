use std::path::Path;

use filekit_cli::{
    Result, TOOL_VERSION, folder_option, init_tracing, list_tree, target_folder, write_listing,
};
use filekit_core::{
    OptionSpec, ResolvedOptions, SchemeDefinition, ValueType, fatal, parse_or_exit,
};

fn scheme() -> SchemeDefinition {
    SchemeDefinition::new()
        .with_version(TOOL_VERSION)
        .with_description("Walk a folder depth-first and print its structure")
        .with_option(folder_option("Target folder"))
        .with_option(
            OptionSpec::new("o", ValueType::STRING)
                .with_alias("output")
                .with_help("Write the listing to <output>/<folder name>.txt instead of stdout")
                .with_symbol("output"),
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

    match options.get_str("output").filter(|output| !output.is_empty()) {
        Some(output) => {
            let path = write_listing(&folder, Path::new(output))?;
            println!("Output path: {}", path.display());
        }
        None => {
            for line in list_tree(&folder)? {
                println!("{line}");
            }
        }
    }
    Ok(())
}
