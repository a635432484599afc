//! Parsing of quantity strings such as `"5 amu"` or `"1.5e-3 kJ/mol"`.
//!
//! Grammar (whitespace between tokens is optional):
//!
//! ```text
//! quantity := number
//!           | number ['*'] unit
//!           | unit
//! number   := ['+' | '-'] digits ['.' digits] [('e' | 'E') ['+' | '-'] digits]
//! ```
//!
//! A bare unit has magnitude 1; a bare number is dimensionless.

use crate::error::UnitError;
use crate::quantity::Quantity;
use crate::types::UnitId;

/// Parses a quantity string.
pub fn parse_quantity(input: &str) -> Result<Quantity, UnitError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(UnitError::parse(input, "empty string"));
    }

    let split = number_prefix_len(s);
    let (number, rest) = s.split_at(split);
    let rest = rest.trim_start();

    if number.is_empty() {
        let unit = lookup_unit(input, rest)?;
        return Ok(Quantity::new(1.0, unit));
    }

    let value: f64 = number
        .parse()
        .map_err(|e| UnitError::parse(input, format!("invalid number '{}': {}", number, e)))?;

    let unit_text = match rest.strip_prefix('*') {
        Some(after) => {
            let after = after.trim_start();
            if after.is_empty() {
                return Err(UnitError::parse(input, "missing unit after '*'"));
            }
            after
        }
        None => rest,
    };

    if unit_text.is_empty() {
        return Ok(Quantity::new(value, UnitId::Dimensionless));
    }

    let unit = lookup_unit(input, unit_text)?;
    Ok(Quantity::new(value, unit))
}

fn lookup_unit(input: &str, text: &str) -> Result<UnitId, UnitError> {
    if text.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Err(UnitError::parse(input, format!("unexpected '{}'", text)));
    }
    UnitId::lookup(text).ok_or_else(|| UnitError::UndefinedUnit(text.to_string()))
}

/// Byte length of the leading number in `s`, or 0 if there is none.
fn number_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    // Exponent only counts when digits follow, so "5e" stays "5" + unit "e".
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
