//! Scanning the global options with [`clap`].
//!
//! clap plays the part of the long-option scanner: the remapped table is
//! registered as clap arguments, and each occurrence clap matched is reported
//! back to [`parse_global_opt`] as an [`OptionCode`].

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::dispatch::{GlobalOptError, parse_global_opt};
use crate::settings::GlobalSettings;
use crate::types::{OptionCode, OptionDescriptor};

/// Adds one argument per entry of `table` to `cmd`.
///
/// Value options may be repeated and keep every occurrence; `verbose` is
/// counted.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use seqopts_core::*;
///
/// let mut table = global_option_table();
/// assign_short_opts(&mut table, "-.O.v");
///
/// let cmd = register_global_args(Command::new("view"), &table);
/// let matches = cmd.try_get_matches_from(["view", "-O", "bam", "-vv"]).unwrap();
///
/// let mut settings = GlobalSettings::new();
/// apply_global_matches(&matches, &table, &mut settings).unwrap();
/// assert_eq!(settings.output.format, Some(FileFormat::Bam));
/// assert_eq!(settings.verbosity, 2);
/// ```
pub fn register_global_args(mut cmd: Command, table: &[OptionDescriptor]) -> Command {
    for desc in table {
        let option = desc.option;
        let mut arg = Arg::new(option.long_name())
            .long(option.long_name())
            .help(option.description().join(" "));
        if let Some(short) = desc.short {
            arg = arg.short(short);
        }

        arg = if desc.takes_value {
            arg.action(ArgAction::Append)
                .num_args(1)
                .value_name(option.value_name().unwrap_or("VALUE"))
        } else {
            arg.action(ArgAction::Count)
        };

        cmd = cmd.arg(arg);
    }
    cmd
}

/// Dispatches every global option occurrence in `matches` to `settings`.
///
/// Value options are applied in command-line order, followed by counted
/// flags. Stops at the first failing option.
pub fn apply_global_matches(
    matches: &ArgMatches,
    table: &[OptionDescriptor],
    settings: &mut GlobalSettings,
) -> Result<(), GlobalOptError> {
    let mut occurrences: Vec<(usize, OptionCode, &str)> = Vec::new();
    let mut flags: Vec<OptionCode> = Vec::new();

    for desc in table {
        let id = desc.option.long_name();
        if desc.takes_value {
            let (Some(indices), Some(values)) =
                (matches.indices_of(id), matches.get_many::<String>(id))
            else {
                continue;
            };
            for (index, value) in indices.zip(values) {
                occurrences.push((index, desc.code(), value.as_str()));
            }
        } else {
            let count = matches.get_count(id);
            flags.extend(std::iter::repeat_n(desc.code(), usize::from(count)));
        }
    }

    occurrences.sort_by_key(|&(index, _, _)| index);

    for (_, code, value) in occurrences {
        parse_global_opt(code, Some(value), table, settings)?;
    }
    for code in flags {
        parse_global_opt(code, None, table, settings)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{FileFormat, FormatError, FormatOptionKey};
    use crate::remap::assign_short_opts;
    use crate::types::global_option_table;

    fn command(control: &str) -> (Command, Vec<OptionDescriptor>) {
        let mut table = global_option_table();
        assign_short_opts(&mut table, control);
        let cmd = register_global_args(
            Command::new("sub").arg(Arg::new("inputs").action(ArgAction::Append).num_args(0..)),
            &table,
        );
        (cmd, table)
    }

    fn parse(control: &str, args: &[&str]) -> Result<GlobalSettings, GlobalOptError> {
        let (cmd, table) = command(control);
        let matches = cmd
            .try_get_matches_from(std::iter::once("sub").chain(args.iter().copied()))
            .unwrap();
        let mut settings = GlobalSettings::new();
        apply_global_matches(&matches, &table, &mut settings)?;
        Ok(settings)
    }

    #[test]
    fn test_long_and_short_forms() {
        let settings = parse(
            "i.o..",
            &[
                "-i",
                "sam",
                "--input-fmt-option",
                "nthreads=2",
                "--output-fmt=cram,no_ref",
                "--verbose",
                "in.sam",
            ],
        )
        .unwrap();
        assert_eq!(settings.input.format, Some(FileFormat::Sam));
        assert_eq!(settings.input.options.len(), 1);
        assert_eq!(settings.output.format, Some(FileFormat::Cram));
        assert_eq!(settings.output.options[0].key, FormatOptionKey::NoRef);
        assert_eq!(settings.verbosity, 1);
    }

    #[test]
    fn test_occurrences_are_applied_in_command_line_order() {
        let settings = parse(
            "...O.",
            &["-O", "level=1", "--output-fmt", "bam,level=6", "-O", "nthreads=3"],
        )
        .unwrap();
        let keys: Vec<_> = settings
            .output
            .options
            .iter()
            .map(|opt| (opt.key, opt.value.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (FormatOptionKey::Level, "1"),
                (FormatOptionKey::Level, "6"),
                (FormatOptionKey::Nthreads, "3"),
            ]
        );
    }

    #[test]
    fn test_disabled_options_are_not_registered() {
        let (cmd, _) = command("-.O.-");
        let err = cmd
            .try_get_matches_from(["sub", "--input-fmt", "bam"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_no_options_leaves_default_settings() {
        let settings = parse("iIoOv", &["file.bam"]).unwrap();
        assert_eq!(settings, GlobalSettings::new());
    }

    #[test]
    fn test_format_error_stops_dispatch() {
        let err = parse("..o..", &["-o", "fastq"]).unwrap_err();
        assert_eq!(
            err,
            GlobalOptError::Format(FormatError::UnknownFormat("fastq".to_string()))
        );
    }
}
