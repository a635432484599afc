//! Runtime-tagged quantity type.

use crate::error::UnitError;
use crate::magnitude::Magnitude;
use crate::registry;
use crate::types::{DimensionId, UnitId};
use core::fmt;
use core::str::FromStr;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// A magnitude (scalar or array) together with the unit it is expressed in.
///
/// ```rust
/// use units_core::{Quantity, UnitId};
///
/// let angle = Quantity::new(180.0, UnitId::Degree);
/// let rad = angle.to("radian").unwrap();
/// assert!((rad.magnitude().as_scalar().unwrap() - core::f64::consts::PI).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    magnitude: Magnitude,
    unit: UnitId,
}

impl Quantity {
    /// Creates a quantity from a magnitude and a resolved unit.
    #[inline]
    pub fn new(magnitude: impl Into<Magnitude>, unit: UnitId) -> Self {
        Self {
            magnitude: magnitude.into(),
            unit,
        }
    }

    /// Creates a quantity from a magnitude and a unit string.
    ///
    /// The magnitude is taken as already expressed in `unit`; nothing is scaled.
    pub fn with_unit(magnitude: impl Into<Magnitude>, unit: &str) -> Result<Self, UnitError> {
        let unit = registry::resolve(unit)?;
        Ok(Self::new(magnitude, unit))
    }

    /// Parses a string such as `"5 amu"`; see [`crate::parse`] for the grammar.
    pub fn parse(s: &str) -> Result<Self, UnitError> {
        crate::parse::parse_quantity(s)
    }

    /// Returns the magnitude.
    #[inline]
    pub fn magnitude(&self) -> &Magnitude {
        &self.magnitude
    }

    /// Consumes the quantity, returning its magnitude.
    #[inline]
    pub fn into_magnitude(self) -> Magnitude {
        self.magnitude
    }

    /// Returns the unit.
    #[inline]
    pub fn unit(&self) -> UnitId {
        self.unit
    }

    /// Returns the dimension of the unit.
    #[inline]
    pub fn dimension(&self) -> DimensionId {
        registry::dimension(self.unit)
    }

    /// Returns the scalar magnitude, if this is not an array quantity.
    #[inline]
    pub fn as_scalar(&self) -> Option<f64> {
        self.magnitude.as_scalar()
    }

    /// `true` if this quantity can be converted to `unit`.
    #[inline]
    pub fn is_compatible_with(&self, unit: UnitId) -> bool {
        registry::compatible(self.unit, unit)
    }

    /// Converts to another unit of the same dimension.
    ///
    /// # Errors
    ///
    /// [`UnitError::Dimensionality`] when the dimensions differ.
    pub fn to_unit(&self, unit: UnitId) -> Result<Self, UnitError> {
        let factor = registry::conversion_factor(self.unit, unit)?;
        let magnitude = if unit == self.unit {
            self.magnitude.clone()
        } else {
            self.magnitude.map(|v| v * factor)
        };
        Ok(Self { magnitude, unit })
    }

    /// Converts to the unit named by `unit`.
    ///
    /// # Errors
    ///
    /// [`UnitError::UndefinedUnit`] for an unknown unit string, otherwise as
    /// [`Quantity::to_unit`].
    pub fn to(&self, unit: &str) -> Result<Self, UnitError> {
        self.to_unit(registry::resolve(unit)?)
    }
}

impl FromStr for Quantity {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            UnitId::Dimensionless => write!(f, "{}", self.magnitude),
            unit => write!(f, "{} {}", self.magnitude, unit.name()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde support: {"val": <magnitude>, "unit": "<name>"}
// ─────────────────────────────────────────────────────────────────────────────

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Quantity", 2)?;
        state.serialize_field("val", &self.magnitude)?;
        state.serialize_field("unit", &self.unit)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(field_identifier, rename_all = "lowercase")]
        enum Field {
            Val,
            Unit,
        }

        struct QuantityVisitor;

        impl<'de> Visitor<'de> for QuantityVisitor {
            type Value = Quantity;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("struct Quantity with val and unit fields")
            }

            fn visit_map<V>(self, mut map: V) -> Result<Quantity, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut val: Option<Magnitude> = None;
                let mut unit: Option<UnitId> = None;

                while let Some(key) = map.next_key()? {
                    match key {
                        Field::Val => {
                            if val.is_some() {
                                return Err(de::Error::duplicate_field("val"));
                            }
                            val = Some(map.next_value()?);
                        }
                        Field::Unit => {
                            if unit.is_some() {
                                return Err(de::Error::duplicate_field("unit"));
                            }
                            unit = Some(map.next_value()?);
                        }
                    }
                }

                let val = val.ok_or_else(|| de::Error::missing_field("val"))?;
                let unit = unit.ok_or_else(|| de::Error::missing_field("unit"))?;
                Ok(Quantity::new(val, unit))
            }
        }

        deserializer.deserialize_struct("Quantity", &["val", "unit"], QuantityVisitor)
    }
}
