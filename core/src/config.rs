//! Subcommand configuration for hosts of the global options.
//!
//! Lists the subcommands a toolkit exposes and the control string each one
//! uses for the global options.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! subcommands:
//!   - name: view
//!     about: Convert between SAM, BAM and CRAM
//!     short_opts: "-.O.."
//!   - name: index
//!     about: Index a coordinate-sorted file
//!     short_opts: "-.--."
//! ```

use std::collections::HashSet;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::remap::assign_short_opts;
use crate::types::{OptionDescriptor, global_option_table};
use crate::validate::{ShortOptsError, validate_short_opts};

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Subcommand name is empty or whitespace-only.
    #[error("subcommand name cannot be empty")]
    EmptySubcommandName,

    /// The subcommand name is taken by the host itself.
    #[error("subcommand name is reserved: {0}")]
    ReservedSubcommand(String),

    /// Two entries share a subcommand name.
    #[error("duplicate subcommand: {0}")]
    DuplicateSubcommand(String),

    /// A subcommand's control string failed validation.
    #[error("subcommand '{name}': {source}")]
    InvalidShortOpts {
        name: String,
        #[source]
        source: ShortOptsError,
    },
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// One subcommand and the global options it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcommandConfig {
    /// Subcommand name as typed on the command line.
    pub name: String,
    /// One-line description.
    #[serde(default)]
    pub about: String,
    /// Control string for the global options.
    pub short_opts: String,
}

impl SubcommandConfig {
    pub fn new(name: &str, about: &str, short_opts: &str) -> Self {
        Self {
            name: name.to_string(),
            about: about.to_string(),
            short_opts: short_opts.to_string(),
        }
    }

    /// Returns the canonical table remapped by this subcommand's control
    /// string.
    pub fn option_table(&self) -> Vec<OptionDescriptor> {
        let mut table = global_option_table();
        assign_short_opts(&mut table, &self.short_opts);
        table
    }
}

/// Top-level toolkit configuration.
///
/// # Examples
///
/// ```
/// use seqopts_core::ToolConfig;
///
/// let config = ToolConfig::default();
/// let view = config.find_subcommand("view").unwrap();
/// assert_eq!(view.short_opts, "-.O..");
/// assert!(config.validate(&['h'], &["config", "usage", "help"]).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Subcommands in display order.
    pub subcommands: Vec<SubcommandConfig>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            subcommands: vec![
                SubcommandConfig::new("view", "Convert between SAM, BAM and CRAM", "-.O.."),
                SubcommandConfig::new("sort", "Sort alignments by coordinate", "-.O.-"),
                SubcommandConfig::new("index", "Index a coordinate-sorted file", "-.--."),
                SubcommandConfig::new("flagstat", "Count alignments by flag", "-.---"),
            ],
        }
    }
}

impl ToolConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// or [`YamlError`](ConfigError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Looks up a subcommand by name.
    pub fn find_subcommand(&self, name: &str) -> Option<&SubcommandConfig> {
        self.subcommands.iter().find(|sub| sub.name == name)
    }

    /// Checks subcommand names and every control string.
    ///
    /// `reserved_shorts` lists short letters the host already uses for its
    /// own options, `reserved_names` the subcommand names it handles itself.
    /// Reports the first problem found.
    pub fn validate(&self, reserved_shorts: &[char], reserved_names: &[&str]) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for sub in &self.subcommands {
            if sub.name.trim().is_empty() {
                return Err(ConfigError::EmptySubcommandName);
            }
            if reserved_names.contains(&sub.name.as_str()) {
                return Err(ConfigError::ReservedSubcommand(sub.name.clone()));
            }
            if !seen.insert(sub.name.as_str()) {
                return Err(ConfigError::DuplicateSubcommand(sub.name.clone()));
            }
            if let Some(source) = validate_short_opts(&sub.short_opts, reserved_shorts)
                .into_iter()
                .next()
            {
                return Err(ConfigError::InvalidShortOpts {
                    name: sub.name.clone(),
                    source,
                });
            }
        }
        Ok(())
    }
}
