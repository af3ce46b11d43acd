//! Resolving tokenized arguments against a scheme.
//!
//! Parsing ends in one of three states: help was requested, the version was
//! requested, or the options were resolved. The first two are returned as
//! [`Outcome`] variants carrying the text to print; deciding to print and
//! exit is left to the caller ([`parse_or_exit`] does it for binaries).

use std::process;

use tracing::debug;

use crate::convert::convert;
use crate::error::{Result, SchemeError};
use crate::help::{HelpContext, HelpLayout, render_help};
use crate::link::{LinkedOption, LinkedScheme};
use crate::options::ResolvedOptions;
use crate::tokenize::{ParsedArgs, tokenize};
use crate::types::{OptionValue, SchemeDefinition};
use crate::validate::validate_scheme;

/// Flags that request help.
pub const HELP_FLAGS: [&str; 2] = ["-h", "--help"];
/// Flags that request the version.
pub const VERSION_FLAGS: [&str; 2] = ["-v", "--version"];

/// Terminal state of a parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `-h/--help` was given; holds the rendered help text.
    Help(String),
    /// `-v/--version` was given; holds the version string (may be empty).
    Version(String),
    /// Options resolved normally.
    Options(ResolvedOptions),
}

/// Argument parser bound to a validated scheme.
///
/// # Examples
///
/// ```
/// use filekit_core::*;
///
/// let scheme = SchemeDefinition::new()
///     .with_version("0.0.1")
///     .with_option(OptionSpec::new("f", ValueType::STRING).with_alias("folder"));
/// let parser = ArgParser::new(&scheme).unwrap();
///
/// let outcome = parser.parse("tool", ["--folder=docs"]);
/// let Outcome::Options(options) = outcome else { unreachable!() };
/// assert_eq!(options.get_str("f"), Some("docs"));
///
/// assert_eq!(parser.parse("tool", ["-v"]), Outcome::Version("0.0.1".into()));
/// ```
#[derive(Debug, Clone)]
pub struct ArgParser<'a> {
    scheme: &'a SchemeDefinition,
    layout: HelpLayout,
}

impl<'a> ArgParser<'a> {
    /// Creates a parser.
    ///
    /// # Errors
    ///
    /// Returns the first structural problem found by [`validate_scheme`].
    pub fn new(scheme: &'a SchemeDefinition) -> Result<Self> {
        if let Some(error) = validate_scheme(scheme).into_iter().next() {
            return Err(error);
        }
        Ok(Self {
            scheme,
            layout: HelpLayout::default(),
        })
    }

    /// Uses a custom help layout.
    pub fn with_layout(mut self, layout: HelpLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Parses `tokens` (program name excluded) for the program `program`.
    pub fn parse<I, S>(&self, program: &str, tokens: I) -> Outcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = tokenize(tokens);
        let ctx = HelpContext::new(program, &self.scheme.meta);

        if parsed.contains_any(&HELP_FLAGS) {
            return Outcome::Help(render_help(self.scheme, &ctx, &self.layout));
        }
        if parsed.contains_any(&VERSION_FLAGS) {
            return Outcome::Version(ctx.version.unwrap_or_default());
        }

        let linked = LinkedScheme::link(self.scheme);
        Outcome::Options(resolve(&parsed, &linked))
    }

    /// Parses the arguments of the current process.
    pub fn parse_env(&self) -> Outcome {
        let mut args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
        let program = args.next().unwrap_or_default();
        self.parse(&program, args)
    }
}

/// Resolves tokenized arguments into typed options.
///
/// `-name` is matched against short keys and `--name` against aliases;
/// anything else, including unknown names, is ignored. Defaults fill in
/// names that were not supplied, and positional arguments are stored under
/// the scheme's isolated name when it declares one.
pub fn resolve(parsed: &ParsedArgs, linked: &LinkedScheme<'_>) -> ResolvedOptions {
    let mut resolved = ResolvedOptions::default();

    for (flag, raw) in parsed.iter() {
        let Some(option) = lookup(flag, linked) else {
            debug!(flag, "Ignoring unknown flag");
            continue;
        };

        match option
            .value_type
            .clone()
            .and_then(|value_type| convert(raw, value_type))
        {
            Ok(value) => {
                for name in option.names() {
                    resolved.insert(name, value.clone());
                }
            }
            Err(error) => {
                debug!(flag, %error, "Option value did not convert");
                for name in option.names() {
                    resolved.insert_failure(name, error.clone());
                }
            }
        }
    }

    for option in linked.options() {
        let Some(default) = &option.spec.default else {
            continue;
        };
        for name in option.names() {
            if !resolved.is_resolved(name) {
                resolved.insert(name, default.clone());
            }
        }
    }

    if let Some(name) = linked.meta().isolated.as_deref() {
        resolved.insert(name, OptionValue::from(parsed.isolated.clone()));
    }

    resolved
}

fn lookup<'s, 'a>(flag: &str, linked: &'s LinkedScheme<'a>) -> Option<&'s LinkedOption<'a>> {
    if let Some(alias) = flag.strip_prefix("--") {
        if alias.starts_with('-') {
            return None;
        }
        linked.by_alias(alias)
    } else {
        linked.by_short(flag.strip_prefix('-')?)
    }
}

/// Validates `scheme` and parses `tokens` (program name excluded).
///
/// # Errors
///
/// Returns a [`SchemeError`] if the scheme is malformed; nothing is parsed
/// in that case.
pub fn parse_args<I, S>(scheme: &SchemeDefinition, program: &str, tokens: I) -> Result<Outcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(ArgParser::new(scheme)?.parse(program, tokens))
}

/// Parses the current process arguments against `scheme`.
pub fn parse_env(scheme: &SchemeDefinition) -> Result<Outcome> {
    Ok(ArgParser::new(scheme)?.parse_env())
}

/// Parses the process arguments, printing help or the version and exiting
/// with status 0 when requested. A malformed scheme exits with status 1.
pub fn parse_or_exit(scheme: &SchemeDefinition) -> ResolvedOptions {
    match parse_env(scheme) {
        Ok(Outcome::Options(options)) => options,
        Ok(Outcome::Help(text)) => {
            print!("{text}");
            process::exit(0);
        }
        Ok(Outcome::Version(version)) => {
            if !version.is_empty() {
                println!("{version}");
            }
            process::exit(0);
        }
        Err(err) => exit_scheme_error(&err),
    }
}

fn exit_scheme_error(err: &SchemeError) -> ! {
    eprintln!("error: {err}");
    process::exit(1);
}
