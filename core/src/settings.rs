//! Settings populated by the global options during one parse session.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::FormatSpec;

/// Settings shared by every subcommand that accepts the global options.
///
/// Construct one per parse session, thread it through
/// [`parse_global_opt`](crate::parse_global_opt) for each matched option, hand
/// it to the code that opens inputs and outputs, and finally
/// [`release`](GlobalSettings::release) it.
///
/// # Examples
///
/// ```
/// use seqopts_core::GlobalSettings;
///
/// let settings = GlobalSettings::new();
/// assert_eq!(settings.verbosity, 0);
/// assert!(settings.input.format.is_none());
/// settings.release();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Input format and its options.
    pub input: FormatSpec,
    /// Output format and its options.
    pub output: FormatSpec,
    /// Number of times `--verbose` was given.
    pub verbosity: u32,
}

impl GlobalSettings {
    /// Creates empty settings: no formats, no options, verbosity zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the parse session, dropping both option lists.
    pub fn release(self) {
        debug!(
            input_options = self.input.options.len(),
            output_options = self.output.options.len(),
            "releasing global settings"
        );
    }
}
