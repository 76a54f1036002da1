//! Control string validation.
//!
//! [`assign_short_opts`](crate::assign_short_opts) trusts its caller: it does
//! not look for short letters assigned twice or for control strings longer
//! than the option table. Hosts that take control strings from configuration
//! run them through [`validate_short_opts`] first.
//!
//! # Examples
//!
//! ```
//! use seqopts_core::*;
//!
//! assert!(validate_short_opts("-.O..", &['h']).is_empty());
//!
//! // Invalid: `O` assigned to two options
//! let errors = validate_short_opts("O.O", &[]);
//! assert_eq!(errors, vec![ShortOptsError::DuplicateShort('O')]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{GlobalOption, ShortOpt, parse_short_opts};

/// Control string validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortOptsError {
    /// More characters than there are global options.
    #[error("control string has {len} entries but only {max} global options exist")]
    TooLong { len: usize, max: usize },
    /// The same short letter is assigned to two options.
    #[error("short option -{0} assigned more than once")]
    DuplicateShort(char),
    /// Short letters must be ASCII alphanumeric.
    #[error("invalid short option character '{0}'")]
    InvalidShort(char),
    /// The short letter is already used by the host subcommand.
    #[error("short option -{0} is reserved")]
    ReservedShort(char),
}

/// Validates a control string against the canonical option table.
///
/// Checks the length, that every short letter is ASCII alphanumeric, is not
/// in `reserved`, and appears only once.
pub fn validate_short_opts(control: &str, reserved: &[char]) -> Vec<ShortOptsError> {
    let mut errors = Vec::new();

    let len = control.chars().count();
    if len > GlobalOption::ALL.len() {
        errors.push(ShortOptsError::TooLong {
            len,
            max: GlobalOption::ALL.len(),
        });
    }

    let mut seen: HashSet<char> = HashSet::new();
    for entry in parse_short_opts(control) {
        let ShortOpt::Short(c) = entry else {
            continue;
        };
        if !c.is_ascii_alphanumeric() {
            errors.push(ShortOptsError::InvalidShort(c));
        } else if reserved.contains(&c) {
            errors.push(ShortOptsError::ReservedShort(c));
        } else if !seen.insert(c) {
            errors.push(ShortOptsError::DuplicateShort(c));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_stock_control_strings() {
        for control in ["", "-.O..", "-.O.-", "-.--.", ".....", "iIoOv"] {
            assert!(validate_short_opts(control, &['h']).is_empty(), "{control}");
        }
    }

    #[test]
    fn test_validate_rejects_overlong_control_string() {
        let errors = validate_short_opts("......", &[]);
        assert_eq!(errors, vec![ShortOptsError::TooLong { len: 6, max: 5 }]);
    }

    #[test]
    fn test_validate_rejects_duplicate_short() {
        let errors = validate_short_opts("x.x.x", &[]);
        assert_eq!(
            errors,
            vec![
                ShortOptsError::DuplicateShort('x'),
                ShortOptsError::DuplicateShort('x'),
            ]
        );
    }

    #[test]
    fn test_validate_rejects_punctuation() {
        let errors = validate_short_opts("?.:", &[]);
        assert_eq!(
            errors,
            vec![
                ShortOptsError::InvalidShort('?'),
                ShortOptsError::InvalidShort(':'),
            ]
        );
    }

    #[test]
    fn test_validate_rejects_reserved_short() {
        let errors = validate_short_opts("h....", &['h', 'V']);
        assert_eq!(errors, vec![ShortOptsError::ReservedShort('h')]);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ShortOptsError::DuplicateShort('O').to_string(),
            "short option -O assigned more than once"
        );
        assert_eq!(
            ShortOptsError::TooLong { len: 7, max: 5 }.to_string(),
            "control string has 7 entries but only 5 global options exist"
        );
    }
}
