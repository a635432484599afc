//! Quantity field descriptors bound to a target unit.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use units_core::Quantity;

use crate::coerce::coerce;
use crate::error::InvalidQuantity;
use crate::input::RawInput;
use crate::model::FieldType;

type BeforeValidator = dyn Fn(RawInput) -> Result<Quantity, InvalidQuantity> + Send + Sync;

/// Field type whose stored value is a [`Quantity`] in one fixed unit.
///
/// Every value given to the field, at construction or on assignment, goes
/// through [`coerce`] with the bound unit first.
#[derive(Clone)]
pub struct UnitType {
    unit: Arc<str>,
    before: Arc<BeforeValidator>,
}

/// Builds a field descriptor for quantities in `target_unit`.
///
/// The unit string is not checked here; an unknown unit makes every
/// validation fail with [`InvalidQuantity`].
///
/// ```rust
/// use fieldunits::make_unit_type;
///
/// let nm = make_unit_type("nanometer");
/// let q = nm.validate("15 angstrom").unwrap();
/// assert!((q.as_scalar().unwrap() - 1.5).abs() < 1e-12);
/// ```
pub fn make_unit_type(target_unit: &str) -> UnitType {
    let unit: Arc<str> = Arc::from(target_unit);
    let bound = Arc::clone(&unit);
    UnitType {
        unit,
        before: Arc::new(move |raw| coerce(raw, &bound)),
    }
}

impl UnitType {
    /// Target unit as given to [`make_unit_type`].
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Runs the bound coercion on `raw`.
    pub fn validate(&self, raw: impl Into<RawInput>) -> Result<Quantity, InvalidQuantity> {
        (self.before)(raw.into())
    }
}

impl FieldType for UnitType {
    type Value = Quantity;

    fn validate(&self, raw: RawInput) -> Result<Quantity, InvalidQuantity> {
        UnitType::validate(self, raw)
    }

    fn describe(&self) -> String {
        format!("quantity [{}]", self.unit)
    }
}

impl fmt::Debug for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitType").field("unit", &self.unit).finish()
    }
}

impl PartialEq for UnitType {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
    }
}

/// Quantities in atomic mass units.
pub static AMU_QUANTITY: Lazy<UnitType> = Lazy::new(|| make_unit_type("amu"));

/// Quantities in degrees.
pub static DEGREE_QUANTITY: Lazy<UnitType> = Lazy::new(|| make_unit_type("degree"));

/// Quantities in elementary charges.
pub static ELEMENTARY_CHARGE_QUANTITY: Lazy<UnitType> =
    Lazy::new(|| make_unit_type("elementary_charge"));

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use units_core::UnitId;

    #[test]
    fn test_prebuilt_descriptors() {
        assert_eq!(AMU_QUANTITY.unit(), "amu");
        assert_eq!(DEGREE_QUANTITY.unit(), "degree");
        assert_eq!(ELEMENTARY_CHARGE_QUANTITY.unit(), "elementary_charge");

        let q = DEGREE_QUANTITY.validate(180).unwrap();
        assert_eq!(q, Quantity::new(180i64, UnitId::Degree));
    }

    #[test]
    fn test_same_unit_descriptors_behave_identically() {
        let a = make_unit_type("degree");
        let b = make_unit_type("degree");
        assert_eq!(a, b);

        let inputs = [
            RawInput::from(90),
            RawInput::from("1 radian"),
            RawInput::from(Quantity::new(60.0, UnitId::Arcminute)),
            RawInput::from("3 amu"),
        ];
        for raw in inputs {
            assert_eq!(a.validate(raw.clone()), b.validate(raw));
        }
    }

    #[test]
    fn test_validate_converts_strings() {
        let q = DEGREE_QUANTITY.validate("1 radian").unwrap();
        assert_relative_eq!(q.as_scalar().unwrap(), 57.295_779_513, epsilon = 1e-6);
    }

    #[test]
    fn test_unknown_unit_fails_on_use() {
        let t = make_unit_type("parsec");
        let err = t.validate(1.0).unwrap_err();
        assert_eq!(err.target(), "parsec");
    }

    #[test]
    fn test_descriptors_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UnitType>();

        let handles: Vec<_> = (0..4)
            .map(|i| std::thread::spawn(move || AMU_QUANTITY.validate(i).unwrap()))
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(h.join().unwrap().as_scalar(), Some(i as f64));
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(FieldType::describe(&*AMU_QUANTITY), "quantity [amu]");
        assert_eq!(format!("{:?}", *AMU_QUANTITY), "UnitType { unit: \"amu\" }");
    }
}
