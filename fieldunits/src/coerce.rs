//! Coercion of raw values into quantities of a target unit.
//!
//! Dispatch, first match wins:
//!
//! 1. engine (`units-mm`) quantity: import, then convert;
//! 2. native quantity: convert;
//! 3. string: parse, then convert;
//! 4. non-empty list made only of engine quantities: import as one array,
//!    then convert;
//! 5. plain numbers (int, float, numeric list, array): tag with the target
//!    unit as they are;
//! 6. bytes: decode native-width integers, tag with the target unit as they
//!    are;
//! 7. anything else: rejected.
//!
//! Branches 5 and 6 never scale: their numbers are taken to already be in the
//! target unit. Integers from those branches are stored as `i64`, so they come
//! out exactly as they went in; a list mixing integers and floats is stored
//! as floats. Branches 1 to 4 always convert.

use crate::bytes::decode_native_ints;
use crate::error::InvalidQuantity;
use crate::input::RawInput;
use units_core::{Magnitude, NdArray, Quantity, UnitError};

/// Coerces `raw` into a quantity expressed in `target_unit`.
///
/// # Errors
///
/// [`InvalidQuantity`] for every rejection, with the underlying
/// [`UnitError`] as its source where one exists.
///
/// ```rust
/// use fieldunits::{coerce, RawInput};
/// use units_core::{Quantity, UnitId};
///
/// let q = coerce(RawInput::from(180), "degree").unwrap();
/// assert_eq!(q, Quantity::new(180i64, UnitId::Degree));
///
/// let q = coerce(RawInput::from("1 elementary_charge"), "elementary_charge").unwrap();
/// assert_eq!(q.as_scalar(), Some(1.0));
/// ```
pub fn coerce(raw: RawInput, target_unit: &str) -> Result<Quantity, InvalidQuantity> {
    let kind = raw.kind();
    let reject = |cause: UnitError| InvalidQuantity::new(target_unit, kind, Some(cause));

    match raw {
        #[cfg(feature = "mm")]
        RawInput::Foreign(q) => crate::interop::from_mm(&q)
            .and_then(|q| q.to(target_unit))
            .map_err(reject),

        RawInput::Quantity(q) => q.to(target_unit).map_err(reject),

        RawInput::Str(s) => Quantity::parse(&s)
            .and_then(|q| q.to(target_unit))
            .map_err(reject),

        RawInput::List(items) if is_foreign_list(&items) => {
            import_foreign_list(items, target_unit).map_err(reject)
        }

        RawInput::List(items) => numeric_list(items)
            .and_then(|m| Quantity::with_unit(m, target_unit))
            .map_err(reject),

        RawInput::Array(a) => Quantity::with_unit(a, target_unit).map_err(reject),

        RawInput::Float(v) => Quantity::with_unit(v, target_unit).map_err(reject),

        RawInput::Int(n) => Quantity::with_unit(n, target_unit).map_err(reject),

        RawInput::Bytes(buf) => decode_native_ints(&buf)
            .map(|ints| NdArray::from_vec(ints.into_iter().map(|v| v as i64).collect()))
            .and_then(|a| Quantity::with_unit(a, target_unit))
            .map_err(reject),

        RawInput::Bool(_) | RawInput::Null | RawInput::Map(_) => {
            Err(InvalidQuantity::new(target_unit, kind, None))
        }
    }
}

fn is_foreign_list(items: &[RawInput]) -> bool {
    !items.is_empty() && items.iter().all(RawInput::is_foreign)
}

#[cfg(feature = "mm")]
fn import_foreign_list(items: Vec<RawInput>, target_unit: &str) -> Result<Quantity, UnitError> {
    let foreign: Vec<units_mm::Quantity> = items
        .into_iter()
        .filter_map(|item| match item {
            RawInput::Foreign(q) => Some(q),
            _ => None,
        })
        .collect();
    crate::interop::from_mm_list(&foreign)?.to(target_unit)
}

#[cfg(not(feature = "mm"))]
fn import_foreign_list(_items: Vec<RawInput>, _target_unit: &str) -> Result<Quantity, UnitError> {
    // is_foreign_list never holds without the engine unit system
    Err(UnitError::Shape("no engine unit system available".to_string()))
}

/// Builds an array from a (possibly nested) list of plain numbers.
fn numeric_list(items: Vec<RawInput>) -> Result<Magnitude, UnitError> {
    let parts = items
        .into_iter()
        .map(numeric_element)
        .collect::<Result<Vec<_>, _>>()?;
    Magnitude::stack(parts)
}

fn numeric_element(item: RawInput) -> Result<Magnitude, UnitError> {
    match item {
        RawInput::Int(n) => Ok(Magnitude::Int(n)),
        RawInput::Float(v) => Ok(Magnitude::Scalar(v)),
        RawInput::List(inner) => numeric_list(inner),
        RawInput::Array(a) => Ok(Magnitude::Array(a)),
        other => Err(UnitError::Shape(format!(
            "list element of kind '{}' is not a number",
            other.kind()
        ))),
    }
}
