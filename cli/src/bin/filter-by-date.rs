use std::path::Path;

use chrono::Local;
use filekit_cli::{
    DATE_FORMAT, Result, TOOL_VERSION, copy_recent, files_modified_after, folder_option,
    init_tracing, parse_date, target_folder,
};
use filekit_core::{
    OptionSpec, ResolvedOptions, SchemeDefinition, ValueType, fatal, parse_or_exit,
};

fn scheme() -> SchemeDefinition {
    SchemeDefinition::new()
        .with_version(TOOL_VERSION)
        .with_description("Walk a folder depth-first and report the files modified after a date")
        .with_option(folder_option("Target folder"))
        .with_option(
            OptionSpec::new("o", ValueType::STRING)
                .with_alias("output")
                .with_help("Copy the matching files below this folder, keeping their relative paths")
                .with_symbol("output"),
        )
        .with_option(
            OptionSpec::new("d", ValueType::STRING)
                .with_alias("date")
                .with_help("Only keep files modified after this date, YYYY-MM-DD[ HH:MM:SS] or RFC 3339 (default now)")
                .with_symbol("date"),
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
    let since = match options.get_str("date").filter(|date| !date.is_empty()) {
        Some(date) => parse_date(date)?,
        None => Local::now(),
    };
    let output = options.get_str("output").filter(|output| !output.is_empty());

    let files = files_modified_after(&folder, since)?;
    println!("Found: {} files", files.len());
    println!();
    for file in &files {
        let date = file.modified.format(DATE_FORMAT);
        match output {
            Some(output) => {
                let target = copy_recent(file, Path::new(output))?;
                println!("Input path: {}", file.path.display());
                println!("Output path: {}", target.display());
            }
            None => println!("Path: {}", file.path.display()),
        }
        println!("Date: {date}");
        println!();
    }
    Ok(())
}
