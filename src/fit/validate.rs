//! Numeric input validation.
//!
//! Two checks live here:
//!
//! - a textual check for raw fields (CSV cells, CLI strings) against the
//!   plain numeric-literal grammar, used before parsing
//! - a finiteness check over already-parsed columns, used by the engine's
//!   validate mode
//!
//! Both fail fast and report the offending field and index.

use crate::error::{Field, LineFitError};

/// Does `raw` look like a plain decimal number?
///
/// Accepted: optional sign, digits with an optional fractional part (or a
/// leading `.` followed by digits), optional exponent. Surrounding whitespace,
/// `inf`, `nan`, hex and digit separators are rejected.
pub fn is_numeric_literal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// Parse a raw field, rejecting anything that is not a numeric literal.
pub fn parse_numeric(raw: &str, field: Field, index: usize) -> Result<f64, LineFitError> {
    let not_numeric = || LineFitError::NotNumeric {
        field,
        index,
        value: raw.to_string(),
    };
    if !is_numeric_literal(raw) {
        return Err(not_numeric());
    }
    let value: f64 = raw.parse().map_err(|_| not_numeric())?;
    // Literals like `1e999` are well-formed but overflow.
    if !value.is_finite() {
        return Err(not_numeric());
    }
    Ok(value)
}

/// Ensure every value in a column is finite.
pub fn ensure_finite(values: &[f64], field: Field) -> Result<(), LineFitError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(LineFitError::NotNumeric {
            field,
            index,
            value: values[index].to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_numbers() {
        for raw in ["0", "42", "-3", "+7", "1.5", "-.5", ".25", "5.", "1e3", "2.5E-4", "-1.e+2"] {
            assert!(is_numeric_literal(raw), "{raw}");
        }
    }

    #[test]
    fn rejects_non_numbers() {
        for raw in ["", ".", "-", "+.", "e5", "1e", "1e+", "abc", "1,5", " 1", "1 ", "nan", "inf", "0x10", "1..2"] {
            assert!(!is_numeric_literal(raw), "{raw:?}");
        }
    }

    #[test]
    fn parse_reports_field_and_index() {
        assert_eq!(parse_numeric("4039", Field::Y, 0), Ok(4039.0));
        let err = parse_numeric("12a", Field::X, 7).unwrap_err();
        assert_eq!(
            err,
            LineFitError::NotNumeric {
                field: Field::X,
                index: 7,
                value: "12a".to_string(),
            }
        );
    }

    #[test]
    fn parse_rejects_overflowing_literals() {
        assert!(parse_numeric("1e999", Field::X, 0).is_err());
    }

    #[test]
    fn finite_check_finds_first_bad_value() {
        assert!(ensure_finite(&[1.0, 2.0], Field::X).is_ok());
        let err = ensure_finite(&[1.0, f64::NAN, f64::INFINITY], Field::Weight).unwrap_err();
        match err {
            LineFitError::NotNumeric { field, index, .. } => {
                assert_eq!(field, Field::Weight);
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
