//! Option type definitions for the shared global options.
//!
//! This module defines the closed set of global options every subcommand can
//! expose, the table entries handed to a long-option scanner, and the codes a
//! scanner reports back when one of them matches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the global options shared across subcommands.
///
/// The variants are listed in canonical order; control strings are indexed
/// against [`GlobalOption::ALL`].
///
/// # Examples
///
/// ```
/// use seqopts_core::GlobalOption;
///
/// let opt: GlobalOption = "output-fmt".parse().unwrap();
/// assert_eq!(opt, GlobalOption::OutputFmt);
/// assert!(opt.takes_value());
/// assert!(!GlobalOption::Verbose.takes_value());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlobalOption {
    /// `--input-fmt FORMAT[,OPT[=VAL]]...`
    InputFmt,
    /// `--input-fmt-option OPT[=VAL]`
    InputFmtOption,
    /// `--output-fmt FORMAT[,OPT[=VAL]]...`
    OutputFmt,
    /// `--output-fmt-option OPT[=VAL]`
    OutputFmtOption,
    /// `--verbose`, repeatable.
    Verbose,
}

impl GlobalOption {
    /// Every global option in canonical table order.
    pub const ALL: [GlobalOption; 5] = [
        GlobalOption::InputFmt,
        GlobalOption::InputFmtOption,
        GlobalOption::OutputFmt,
        GlobalOption::OutputFmtOption,
        GlobalOption::Verbose,
    ];

    /// Long option name without the leading `--`.
    pub fn long_name(self) -> &'static str {
        match self {
            GlobalOption::InputFmt => "input-fmt",
            GlobalOption::InputFmtOption => "input-fmt-option",
            GlobalOption::OutputFmt => "output-fmt",
            GlobalOption::OutputFmtOption => "output-fmt-option",
            GlobalOption::Verbose => "verbose",
        }
    }

    /// Whether the option requires an argument.
    pub fn takes_value(self) -> bool {
        !matches!(self, GlobalOption::Verbose)
    }

    /// Argument placeholder shown in usage text.
    pub fn value_name(self) -> Option<&'static str> {
        match self {
            GlobalOption::InputFmt | GlobalOption::OutputFmt => Some("FORMAT[,OPT[=VAL]]..."),
            GlobalOption::InputFmtOption | GlobalOption::OutputFmtOption => Some("OPT[=VAL]"),
            GlobalOption::Verbose => None,
        }
    }

    /// Help description lines, without indentation.
    pub fn description(self) -> &'static [&'static str] {
        match self {
            GlobalOption::InputFmt => &["Specify input format (SAM, BAM, CRAM)"],
            GlobalOption::InputFmtOption => &[
                "Specify a single input file format option in the form",
                "of OPTION or OPTION=VALUE",
            ],
            GlobalOption::OutputFmt => &["Specify output format (SAM, BAM, CRAM)"],
            GlobalOption::OutputFmtOption => &[
                "Specify a single output file format option in the form",
                "of OPTION or OPTION=VALUE",
            ],
            GlobalOption::Verbose => &["Increment level of verbosity"],
        }
    }
}

impl fmt::Display for GlobalOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

/// A long option name that is not one of the global options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown global option: --{0}")]
pub struct UnknownOption(pub String);

impl FromStr for GlobalOption {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("--").unwrap_or(s);
        GlobalOption::ALL
            .into_iter()
            .find(|opt| opt.long_name() == name)
            .ok_or_else(|| UnknownOption(name.to_string()))
    }
}

/// Code reported by a long-option scanner when an option matches.
///
/// Options with an assigned short form report that character. Long-only
/// options report a code unique to the option itself, so they can never be
/// confused with a short letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionCode {
    /// The option was registered with this short form.
    Short(char),
    /// The option has no short form.
    Long(GlobalOption),
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionCode::Short(c) => write!(f, "-{c}"),
            OptionCode::Long(opt) => write!(f, "--{opt}"),
        }
    }
}

/// One entry in an option table.
///
/// # Examples
///
/// ```
/// use seqopts_core::{GlobalOption, OptionCode, OptionDescriptor};
///
/// let mut desc = OptionDescriptor::new(GlobalOption::OutputFmt);
/// assert_eq!(desc.code(), OptionCode::Long(GlobalOption::OutputFmt));
///
/// desc.short = Some('O');
/// assert_eq!(desc.code(), OptionCode::Short('O'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor {
    /// Which global option this entry describes.
    pub option: GlobalOption,
    /// Assigned short form, `None` when the option is long-only.
    pub short: Option<char>,
    /// Whether the scanner must collect an argument.
    pub takes_value: bool,
}

impl OptionDescriptor {
    /// Creates an entry with no short form.
    pub fn new(option: GlobalOption) -> Self {
        Self {
            option,
            short: None,
            takes_value: option.takes_value(),
        }
    }

    /// The code a scanner reports when this entry matches.
    pub fn code(&self) -> OptionCode {
        match self.short {
            Some(c) => OptionCode::Short(c),
            None => OptionCode::Long(self.option),
        }
    }
}

/// Returns the canonical option table, one entry per [`GlobalOption`] with
/// no short forms assigned.
///
/// # Examples
///
/// ```
/// use seqopts_core::{GlobalOption, global_option_table};
///
/// let table = global_option_table();
/// assert_eq!(table.len(), GlobalOption::ALL.len());
/// assert!(table.iter().all(|d| d.short.is_none()));
/// ```
pub fn global_option_table() -> Vec<OptionDescriptor> {
    GlobalOption::ALL
        .into_iter()
        .map(OptionDescriptor::new)
        .collect()
}

/// A single parsed control-string character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortOpt {
    /// `.`: keep the option, long form only.
    LongOnly,
    /// `-`: remove the option entirely.
    Disabled,
    /// Any other character: keep the option under this short form.
    Short(char),
}

impl From<char> for ShortOpt {
    fn from(c: char) -> Self {
        match c {
            '.' => ShortOpt::LongOnly,
            '-' => ShortOpt::Disabled,
            other => ShortOpt::Short(other),
        }
    }
}

/// Parses a control string into one [`ShortOpt`] per character.
///
/// # Examples
///
/// ```
/// use seqopts_core::{ShortOpt, parse_short_opts};
///
/// assert_eq!(
///     parse_short_opts("-.x"),
///     vec![ShortOpt::Disabled, ShortOpt::LongOnly, ShortOpt::Short('x')]
/// );
/// ```
pub fn parse_short_opts(control: &str) -> Vec<ShortOpt> {
    control.chars().map(ShortOpt::from).collect()
}
