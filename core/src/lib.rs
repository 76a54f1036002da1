//! Global command-line options shared by the subcommands of a sequence
//! toolkit.
//!
//! Every subcommand accepts the same small set of global options:
//!
//! - `--input-fmt FORMAT[,OPT[=VAL]]...` and `--output-fmt ...` select a
//!   [`FileFormat`] together with format options,
//! - `--input-fmt-option OPT[=VAL]` and `--output-fmt-option ...` add a
//!   single [`FormatOption`],
//! - `--verbose` raises the verbosity level.
//!
//! A subcommand decides which of these it exposes, and under which short
//! letters, with a control string passed to [`assign_short_opts`]. Matched
//! options are applied to a [`GlobalSettings`] with [`parse_global_opt`], and
//! [`write_global_help`] prints the matching usage text.
//!
//! With the default `clap` feature, [`register_global_args`] and
//! [`apply_global_matches`] connect the remapped table to a
//! [`clap::Command`].
//!
//! # Example
//!
//! ```
//! use seqopts_core::*;
//!
//! // `-O` for --output-fmt, --input-fmt disabled, the rest long-only.
//! let mut table = global_option_table();
//! assign_short_opts(&mut table, "-.O..");
//!
//! let mut settings = GlobalSettings::new();
//! parse_global_opt(OptionCode::Short('O'), Some("bam,level=1"), &table, &mut settings).unwrap();
//! parse_global_opt(OptionCode::Long(GlobalOption::Verbose), None, &table, &mut settings).unwrap();
//!
//! assert_eq!(settings.output.format, Some(FileFormat::Bam));
//! assert_eq!(settings.output.options.len(), 1);
//! assert_eq!(settings.verbosity, 1);
//!
//! let help = global_help("-.O..");
//! assert!(help.starts_with("      --input-fmt-option OPT[=VAL]\n"));
//! settings.release();
//! ```

mod config;
mod dispatch;
mod format;
mod help;
mod remap;
#[cfg(feature = "clap")]
mod scan;
mod settings;
mod types;
mod validate;

pub use config::{ConfigError, SubcommandConfig, ToolConfig};
pub use dispatch::{GlobalOptError, parse_global_opt};
pub use format::{
    FileFormat, FormatError, FormatOption, FormatOptionKey, FormatSpec, OptionKind,
    add_format_option, parse_format_spec,
};
pub use help::{global_help, write_global_help};
pub use remap::assign_short_opts;
#[cfg(feature = "clap")]
pub use scan::{apply_global_matches, register_global_args};
pub use settings::GlobalSettings;
pub use types::*;
pub use validate::{ShortOptsError, validate_short_opts};
