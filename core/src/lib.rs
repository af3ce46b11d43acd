//! Declarative command schemes and argument parsing.
//!
//! This crate is the shared core of the filekit tools. A command describes
//! its options once, as a scheme, and gets back typed values:
//!
//! - [`SchemeDefinition`] / [`OptionSpec`]: the options a command accepts, as
//!   short key, long alias, value type, help text, default and usage symbol,
//!   plus version, description and the positional bucket name ([`Meta`]).
//! - [`tokenize`]: splits raw arguments into flag/value pairs and
//!   positional arguments.
//! - [`LinkedScheme`]: lookup table over short keys and aliases.
//! - [`convert`]: string to typed value, including JSON-encoded arrays.
//! - [`parse_args`] / [`ArgParser`]: the whole pipeline, ending in an
//!   [`Outcome`]: help text, version string or [`ResolvedOptions`].
//! - [`render_help`]: two-column help with width-aware wrapping.
//! - [`only_single_mode`] / [`ensure_single_mode`]: exclusive mode checks.
//!
//! Schemes can also be loaded from JSON or YAML
//! ([`SchemeDefinition::from_path`]).
//!
//! # Example
//!
//! ```
//! use filekit_core::*;
//!
//! let scheme = SchemeDefinition::new()
//!     .with_version("0.0.1")
//!     .with_description("Keep the newest files in a folder")
//!     .with_isolated("rest")
//!     .with_option(
//!         OptionSpec::new("f", ValueType::STRING)
//!             .with_alias("folder")
//!             .with_help("Target folder")
//!             .with_symbol("folder"),
//!     )
//!     .with_option(
//!         OptionSpec::new("c", ValueType::INTEGER)
//!             .with_alias("count")
//!             .with_default(5_i64),
//!     );
//!
//! let outcome = parse_args(&scheme, "prune-files", ["-f", "backups", "extra"]).unwrap();
//! let Outcome::Options(options) = outcome else { unreachable!() };
//!
//! assert_eq!(options.get_str("folder"), Some("backups"));
//! assert_eq!(options.get_i64("count"), Some(5));
//! assert_eq!(options.get_strings("rest"), vec!["extra"]);
//! ```

mod convert;
mod error;
mod help;
mod link;
mod load;
mod mode;
mod options;
mod resolve;
mod tokenize;
mod types;
mod validate;

pub use convert::{convert, convert_scalar};
pub use error::{ConversionError, OptionError, SchemeError};
pub use help::{
    HelpContext, HelpLayout, OPTIONS_HEADER, display_width, render_help, render_rows,
    render_usage, wrap_text,
};
pub use link::{LinkedOption, LinkedScheme};
pub use load::META_KEY;
pub use mode::{ModeConflict, ensure_single_mode, fatal, only_single_mode};
pub use options::ResolvedOptions;
pub use resolve::{
    ArgParser, HELP_FLAGS, Outcome, VERSION_FLAGS, parse_args, parse_env, parse_or_exit,
    resolve,
};
pub use tokenize::{ParsedArgs, RawValue, tokenize};
pub use types::*;
pub use validate::validate_scheme;
