//! Import of molecular-mechanics engine quantities.
//!
//! Engine units are mapped onto the registry by name: spaces become
//! underscores and `/` becomes `_per_`, so `"elementary charge"` maps to
//! `elementary_charge` and `"kilojoule/mole"` to `kilojoule_per_mole`.
//! Values keep their numbers; only their shape is translated:
//!
//! | engine value | magnitude  |
//! |--------------|------------|
//! | `Scalar`     | scalar     |
//! | `Vec3`       | `[3]`      |
//! | `List`       | `[n]`      |
//! | `Vec3List`   | `[n, 3]`   |

use units_core::{registry, Magnitude, NdArray, Quantity, UnitError, UnitId};
use units_mm::Value;

/// Registry unit matching an engine unit.
pub fn native_unit(unit: &units_mm::Unit) -> Result<UnitId, UnitError> {
    let name = unit.name().replace('/', "_per_").replace(' ', "_");
    registry::resolve(&name)
}

fn magnitude_of(value: &Value) -> Result<Magnitude, UnitError> {
    Ok(match value {
        Value::Scalar(v) => Magnitude::Scalar(*v),
        Value::Vec3(v) => Magnitude::from(v.to_array()),
        Value::List(vs) => Magnitude::from(vs.clone()),
        Value::Vec3List(vs) => {
            let data = vs.iter().flat_map(|v| v.to_array()).collect();
            Magnitude::Array(NdArray::new(vec![vs.len(), 3], data)?)
        }
    })
}

/// Imports one engine quantity.
pub fn from_mm(q: &units_mm::Quantity) -> Result<Quantity, UnitError> {
    let unit = native_unit(&q.unit())?;
    Ok(Quantity::new(magnitude_of(q.value())?, unit))
}

/// Imports a list of engine quantities as one array quantity.
///
/// Every element is expressed in the first element's unit and the values are
/// stacked along a new leading axis; this is how box vectors arrive.
///
/// # Errors
///
/// - [`UnitError::Shape`] for an empty list or elements of different shapes.
/// - [`UnitError::Dimensionality`] when an element cannot be expressed in the
///   first element's unit.
/// - [`UnitError::UndefinedUnit`] when the first element's unit, or the unit of
///   an element that cannot be converted, has no registry counterpart.
pub fn from_mm_list(items: &[units_mm::Quantity]) -> Result<Quantity, UnitError> {
    let first = items
        .first()
        .ok_or_else(|| UnitError::Shape("cannot import an empty list".to_string()))?;
    let unit = first.unit();
    let native = native_unit(&unit)?;

    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        let value = match item.value_in_unit(unit) {
            Ok(value) => value,
            Err(_) => {
                let from = native_unit(&item.unit())?;
                return Err(UnitError::Dimensionality {
                    from,
                    to: native,
                    from_dim: from.dimension(),
                    to_dim: native.dimension(),
                });
            }
        };
        parts.push(magnitude_of(&value)?);
    }

    let stacked = NdArray::stack(parts)?;
    Ok(Quantity::new(stacked, native))
}
