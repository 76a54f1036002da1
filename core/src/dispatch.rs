//! Applying a matched global option to [`GlobalSettings`].

use thiserror::Error;
use tracing::{debug, error};

use crate::format::{FormatError, add_format_option, parse_format_spec};
use crate::settings::GlobalSettings;
use crate::types::{GlobalOption, OptionCode, OptionDescriptor};

/// Errors raised while applying a global option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlobalOptError {
    /// The scanner reported a code that no table entry carries.
    #[error("unexpected global option: {0}")]
    UnexpectedOption(OptionCode),
    /// A value-taking option arrived without its argument.
    #[error("option --{0} requires an argument")]
    MissingArgument(GlobalOption),
    /// The format specification or format option did not parse.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Applies one matched global option to `settings`.
///
/// `code` is what the long-option scanner reported; it is looked up in
/// `table`, which must be the same (remapped) table the scanner was given,
/// since subcommands may have reassigned the short forms. `optarg` is the
/// option's argument, if any.
///
/// On error `settings` is left untouched.
///
/// # Examples
///
/// ```
/// use seqopts_core::*;
///
/// let mut table = global_option_table();
/// assign_short_opts(&mut table, "-.O.v");
///
/// let mut settings = GlobalSettings::new();
/// parse_global_opt(OptionCode::Short('O'), Some("cram,no_ref"), &table, &mut settings).unwrap();
/// parse_global_opt(OptionCode::Short('v'), None, &table, &mut settings).unwrap();
/// assert_eq!(settings.output.format, Some(FileFormat::Cram));
/// assert_eq!(settings.verbosity, 1);
///
/// // `--input-fmt` is disabled for this subcommand.
/// let code = OptionCode::Long(GlobalOption::InputFmt);
/// assert!(parse_global_opt(code, Some("bam"), &table, &mut settings).is_err());
/// ```
pub fn parse_global_opt(
    code: OptionCode,
    optarg: Option<&str>,
    table: &[OptionDescriptor],
    settings: &mut GlobalSettings,
) -> Result<(), GlobalOptError> {
    let Some(desc) = table.iter().find(|desc| desc.code() == code) else {
        error!(%code, "unexpected global option");
        return Err(GlobalOptError::UnexpectedOption(code));
    };

    let option = desc.option;
    let arg = || optarg.ok_or(GlobalOptError::MissingArgument(option));

    match option {
        GlobalOption::InputFmt => parse_format_spec(&mut settings.input, arg()?)?,
        GlobalOption::InputFmtOption => add_format_option(&mut settings.input.options, arg()?)?,
        GlobalOption::OutputFmt => parse_format_spec(&mut settings.output, arg()?)?,
        GlobalOption::OutputFmtOption => {
            add_format_option(&mut settings.output.options, arg()?)?
        }
        GlobalOption::Verbose => settings.verbosity += 1,
    }

    debug!(%code, option = %option, optarg, "applied global option");
    Ok(())
}
