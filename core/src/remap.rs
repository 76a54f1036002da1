//! Per-subcommand short option assignment.
//!
//! Each subcommand describes how it exposes the global options with a control
//! string holding one character per entry of the canonical table:
//!
//! - `.` keeps the option with no short form (`--long-opt` only),
//! - `-` disables the option entirely,
//! - any other character becomes the option's short form.
//!
//! ```
//! use seqopts_core::{GlobalOption, assign_short_opts, global_option_table};
//!
//! let mut table = global_option_table();
//! assign_short_opts(&mut table, "-.O.-");
//!
//! let active: Vec<_> = table.iter().map(|d| (d.option, d.short)).collect();
//! assert_eq!(
//!     active,
//!     vec![
//!         (GlobalOption::InputFmtOption, None),
//!         (GlobalOption::OutputFmt, Some('O')),
//!         (GlobalOption::OutputFmtOption, None),
//!     ]
//! );
//! ```

use tracing::{debug, warn};

use crate::types::{OptionDescriptor, ShortOpt};

/// Applies `control` to `table` in place.
///
/// Walks the control string and the table in lock-step with a read and a
/// write cursor. Disabled entries are overwritten by the next kept entry;
/// kept entries take the short form the control string gives them. Entries
/// past the end of the control string are dropped, so an empty control string
/// leaves an empty table.
///
/// Short-form collisions are not checked here; see
/// [`validate_short_opts`](crate::validate_short_opts).
pub fn assign_short_opts(table: &mut Vec<OptionDescriptor>, control: &str) {
    let mut write = 0;

    for (read, c) in control.chars().enumerate() {
        if read >= table.len() {
            warn!(
                control,
                table_len = table.len(),
                "control string is longer than the option table; ignoring the excess"
            );
            break;
        }

        table[write] = table[read];
        match ShortOpt::from(c) {
            ShortOpt::Disabled => continue,
            ShortOpt::LongOnly => {}
            ShortOpt::Short(short) => table[write].short = Some(short),
        }
        write += 1;
    }

    table.truncate(write);
    debug!(control, active = table.len(), "assigned short options");
}
