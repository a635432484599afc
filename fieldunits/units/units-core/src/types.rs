//! Unit and dimension identifiers.

use core::fmt;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Physical dimension a unit measures.
///
/// Conversion is only defined between units that share a dimension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DimensionId {
    /// Pure number.
    Dimensionless,
    /// Length.
    Length,
    /// Time.
    Time,
    /// Plane angle.
    Angle,
    /// Mass.
    Mass,
    /// Electric charge.
    Charge,
    /// Energy.
    Energy,
    /// Energy per amount of substance.
    MolarEnergy,
    /// Amount of substance.
    Amount,
    /// Thermodynamic temperature.
    Temperature,
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DimensionId::Dimensionless => "dimensionless",
            DimensionId::Length => "[length]",
            DimensionId::Time => "[time]",
            DimensionId::Angle => "[angle]",
            DimensionId::Mass => "[mass]",
            DimensionId::Charge => "[charge]",
            DimensionId::Energy => "[energy]",
            DimensionId::MolarEnergy => "[energy] / [substance]",
            DimensionId::Amount => "[substance]",
            DimensionId::Temperature => "[temperature]",
        };
        f.write_str(name)
    }
}

include!(concat!(env!("OUT_DIR"), "/unit_id_enum.rs"));

impl UnitId {
    /// Every unit known to the registry, in `units.csv` order.
    pub const ALL: &'static [UnitId] = &include!(concat!(env!("OUT_DIR"), "/unit_all.rs"));

    /// Canonical name of the unit (e.g. `"elementary_charge"`).
    pub const fn name(&self) -> &'static str {
        include!(concat!(env!("OUT_DIR"), "/unit_names.rs"))
    }

    /// Short symbol of the unit (e.g. `"e"`); empty for [`UnitId::Dimensionless`].
    pub const fn symbol(&self) -> &'static str {
        include!(concat!(env!("OUT_DIR"), "/unit_symbols.rs"))
    }

    /// Converts a raw discriminant back into a unit.
    pub const fn from_u32(value: u32) -> Option<UnitId> {
        include!(concat!(env!("OUT_DIR"), "/unit_from_u32.rs"))
    }

    /// Resolves a unit from its name, symbol or one of its aliases.
    ///
    /// Surrounding whitespace is ignored; matching is case-sensitive since
    /// symbols such as `m` and `M` or `Eh` and `eh` are not interchangeable.
    ///
    /// ```rust
    /// use units_core::UnitId;
    ///
    /// assert_eq!(UnitId::lookup("amu"), Some(UnitId::Amu));
    /// assert_eq!(UnitId::lookup(" kJ/mol "), Some(UnitId::KilojoulePerMole));
    /// assert_eq!(UnitId::lookup("furlong"), None);
    /// ```
    pub fn lookup(s: &str) -> Option<UnitId> {
        let s = s.trim();
        include!(concat!(env!("OUT_DIR"), "/unit_lookup.rs"))
    }

    /// Dimension of this unit.
    #[inline]
    pub fn dimension(&self) -> DimensionId {
        crate::registry::meta(*self).dim
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for UnitId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for UnitId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UnitIdVisitor;

        impl Visitor<'_> for UnitIdVisitor {
            type Value = UnitId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a unit name, symbol or alias")
            }

            fn visit_str<E>(self, v: &str) -> Result<UnitId, E>
            where
                E: de::Error,
            {
                UnitId::lookup(v)
                    .ok_or_else(|| E::custom(format!("undefined unit '{}'", v)))
            }
        }

        deserializer.deserialize_str(UnitIdVisitor)
    }
}
