//! File format specifications and format-specific options.
//!
//! A format specification names a file format and carries a list of
//! `KEY[=VALUE]` options for the reader or writer of that format:
//!
//! ```text
//! cram,version=3.0,no_ref
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing format specifications and options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The format name before the first comma is empty.
    #[error("missing format name in '{0}'")]
    EmptyFormat(String),
    /// The format name is not a supported file format.
    #[error("unknown format '{0}'")]
    UnknownFormat(String),
    /// An option token has no key (e.g. `=4`).
    #[error("missing option name in '{0}'")]
    EmptyOptionKey(String),
    /// The option key is not a known format option.
    #[error("unknown format option '{0}'")]
    UnknownOption(String),
    /// An integer-valued option was given a non-integer value.
    #[error("option '{key}' expects an integer, got '{value}'")]
    InvalidInteger { key: String, value: String },
}

/// Supported file formats.
///
/// Names are matched case-insensitively.
///
/// # Examples
///
/// ```
/// use seqopts_core::FileFormat;
///
/// assert_eq!("BAM".parse::<FileFormat>().unwrap(), FileFormat::Bam);
/// assert!("vcf".parse::<FileFormat>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Sam,
    Bam,
    Cram,
}

impl FileFormat {
    /// Lowercase format name.
    pub fn name(self) -> &'static str {
        match self {
            FileFormat::Sam => "sam",
            FileFormat::Bam => "bam",
            FileFormat::Cram => "cram",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "" => Err(FormatError::EmptyFormat(s.to_string())),
            "sam" => Ok(FileFormat::Sam),
            "bam" => Ok(FileFormat::Bam),
            "cram" => Ok(FileFormat::Cram),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Value kind accepted by a format option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Decimal or `0x`-prefixed hexadecimal integer.
    Integer,
    /// Free text.
    Text,
}

/// Known format option keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatOptionKey {
    Nthreads,
    Level,
    Reference,
    Version,
    SeqsPerSlice,
    SlicesPerContainer,
    EmbedRef,
    NoRef,
    IgnoreMd5,
    UseBzip2,
    UseLzma,
    UseRans,
    MultiSeqPerSlice,
    RequiredFields,
}

impl FormatOptionKey {
    /// Every known key.
    pub const ALL: [FormatOptionKey; 14] = [
        FormatOptionKey::Nthreads,
        FormatOptionKey::Level,
        FormatOptionKey::Reference,
        FormatOptionKey::Version,
        FormatOptionKey::SeqsPerSlice,
        FormatOptionKey::SlicesPerContainer,
        FormatOptionKey::EmbedRef,
        FormatOptionKey::NoRef,
        FormatOptionKey::IgnoreMd5,
        FormatOptionKey::UseBzip2,
        FormatOptionKey::UseLzma,
        FormatOptionKey::UseRans,
        FormatOptionKey::MultiSeqPerSlice,
        FormatOptionKey::RequiredFields,
    ];

    /// Key as written on the command line.
    pub fn name(self) -> &'static str {
        match self {
            FormatOptionKey::Nthreads => "nthreads",
            FormatOptionKey::Level => "level",
            FormatOptionKey::Reference => "reference",
            FormatOptionKey::Version => "version",
            FormatOptionKey::SeqsPerSlice => "seqs_per_slice",
            FormatOptionKey::SlicesPerContainer => "slices_per_container",
            FormatOptionKey::EmbedRef => "embed_ref",
            FormatOptionKey::NoRef => "no_ref",
            FormatOptionKey::IgnoreMd5 => "ignore_md5",
            FormatOptionKey::UseBzip2 => "use_bzip2",
            FormatOptionKey::UseLzma => "use_lzma",
            FormatOptionKey::UseRans => "use_rans",
            FormatOptionKey::MultiSeqPerSlice => "multi_seq_per_slice",
            FormatOptionKey::RequiredFields => "required_fields",
        }
    }

    /// Kind of value the key accepts.
    pub fn kind(self) -> OptionKind {
        match self {
            FormatOptionKey::Reference | FormatOptionKey::Version => OptionKind::Text,
            _ => OptionKind::Integer,
        }
    }
}

impl fmt::Display for FormatOptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatOptionKey {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatOptionKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| FormatError::UnknownOption(s.to_string()))
    }
}

/// A single format option.
///
/// # Examples
///
/// ```
/// use seqopts_core::{FormatOption, FormatOptionKey};
///
/// let opt: FormatOption = "nthreads=4".parse().unwrap();
/// assert_eq!(opt.key, FormatOptionKey::Nthreads);
/// assert_eq!(opt.value, "4");
/// assert_eq!(opt.as_integer(), Some(4));
///
/// let flag: FormatOption = "no_ref".parse().unwrap();
/// assert_eq!(flag.value, "1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOption {
    pub key: FormatOptionKey,
    /// Raw value text; `"1"` when the option was given without a value.
    pub value: String,
}

impl FormatOption {
    /// Integer value, for integer-valued keys.
    pub fn as_integer(&self) -> Option<i64> {
        match self.key.kind() {
            OptionKind::Integer => parse_integer(&self.value),
            OptionKind::Text => None,
        }
    }
}

impl FromStr for FormatOption {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = match s.split_once('=') {
            Some((key, value)) => (key, value),
            None => (s, "1"),
        };
        if key.is_empty() {
            return Err(FormatError::EmptyOptionKey(s.to_string()));
        }

        let key: FormatOptionKey = key.parse()?;
        if key.kind() == OptionKind::Integer && parse_integer(value).is_none() {
            return Err(FormatError::InvalidInteger {
                key: key.name().to_string(),
                value: value.to_string(),
            });
        }

        Ok(Self {
            key,
            value: value.to_string(),
        })
    }
}

impl fmt::Display for FormatOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

fn parse_integer(value: &str) -> Option<i64> {
    let (digits, negative) = match value.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (value, false),
    };
    // Only the one leading `-`; no sign may follow it or the `0x` prefix.
    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            i64::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
            digits.parse::<i64>().ok()?
        }
        None => return None,
    };
    Some(if negative { -parsed } else { parsed })
}

/// A file format together with its format-specific options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSpec {
    /// Selected format, `None` until one is chosen.
    pub format: Option<FileFormat>,
    /// Options in the order they were given.
    pub options: Vec<FormatOption>,
}

impl FormatSpec {
    /// Returns the last value given for `key`, if any.
    pub fn option(&self, key: FormatOptionKey) -> Option<&FormatOption> {
        self.options.iter().rev().find(|opt| opt.key == key)
    }
}

/// Parses `FORMAT[,OPT[=VAL]]...` into `spec`.
///
/// Sets the format and appends the trailing options to any already present.
/// Nothing is written unless the whole argument parses.
///
/// # Examples
///
/// ```
/// use seqopts_core::{FileFormat, FormatSpec, parse_format_spec};
///
/// let mut spec = FormatSpec::default();
/// parse_format_spec(&mut spec, "cram,version=3.0,no_ref").unwrap();
/// assert_eq!(spec.format, Some(FileFormat::Cram));
/// assert_eq!(spec.options.len(), 2);
///
/// assert!(parse_format_spec(&mut spec, "bam,bogus=1").is_err());
/// assert_eq!(spec.format, Some(FileFormat::Cram));
/// ```
pub fn parse_format_spec(spec: &mut FormatSpec, arg: &str) -> Result<(), FormatError> {
    let mut parts = arg.split(',');
    let format: FileFormat = parts.next().unwrap_or_default().parse()?;
    let options = parts
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect::<Result<Vec<FormatOption>, _>>()?;

    spec.format = Some(format);
    spec.options.extend(options);
    Ok(())
}

/// Parses a single `OPT[=VAL]` token and appends it to `options`.
pub fn add_format_option(options: &mut Vec<FormatOption>, arg: &str) -> Result<(), FormatError> {
    options.push(arg.parse()?);
    Ok(())
}
