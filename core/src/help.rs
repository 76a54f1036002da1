//! Usage text for the global options.

use std::io::{self, Write};

use crate::types::{GlobalOption, ShortOpt, parse_short_opts};

const DESCRIPTION_INDENT: &str = "               ";

/// Writes usage lines for the global options enabled by `control`.
///
/// Takes the same control string as
/// [`assign_short_opts`](crate::assign_short_opts): disabled options are
/// skipped, long-only options get a `--long` header and the rest a
/// `-c, --long` header.
///
/// # Examples
///
/// ```
/// use seqopts_core::write_global_help;
///
/// let mut out = Vec::new();
/// write_global_help(&mut out, "-.O.-").unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("  -O, --output-fmt FORMAT[,OPT[=VAL]]...\n"));
/// assert!(!text.contains("--verbose"));
/// ```
pub fn write_global_help<W: Write + ?Sized>(out: &mut W, control: &str) -> io::Result<()> {
    for (option, entry) in GlobalOption::ALL.into_iter().zip(parse_short_opts(control)) {
        match entry {
            ShortOpt::Disabled => continue,
            ShortOpt::LongOnly => write!(out, "      --")?,
            ShortOpt::Short(c) => write!(out, "  -{c}, --")?,
        }

        match option.value_name() {
            Some(value) => writeln!(out, "{} {value}", option.long_name())?,
            None => writeln!(out, "{}", option.long_name())?,
        }
        for line in option.description() {
            writeln!(out, "{DESCRIPTION_INDENT}{line}")?;
        }
    }
    Ok(())
}

/// Renders [`write_global_help`] into a `String`.
pub fn global_help(control: &str) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_global_help(&mut out, control);
    String::from_utf8_lossy(&out).into_owned()
}
