//! Molecular-mechanics unit system.
//!
//! `units-mm` is the unit system simulation engines hand their data out in.
//! It is independent of `units-core`: units are measured against their own
//! base units (dalton, nanometer, picosecond, radian, elementary charge,
//! kilojoule/mole, kelvin, mole), unit names follow the engine's conventions
//! (`"elementary charge"`, `"kilojoule/mole"`), and values can be plain
//! numbers, 3-vectors, lists, or lists of 3-vectors.
//!
//! ```rust
//! use units_mm::{Quantity, Vec3, ANGSTROM, NANOMETER};
//!
//! let box_a = Quantity::new(Vec3::new(30.0, 0.0, 0.0), ANGSTROM);
//! let in_nm = box_a.in_units_of(NANOMETER).unwrap();
//! assert_eq!(in_nm.unit(), NANOMETER);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use core::fmt;

/// Base dimension of an engine unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseDimension {
    /// Mass (base: dalton).
    Mass,
    /// Length (base: nanometer).
    Length,
    /// Time (base: picosecond).
    Time,
    /// Plane angle (base: radian).
    Angle,
    /// Charge (base: elementary charge).
    Charge,
    /// Energy per mole (base: kilojoule/mole).
    MolarEnergy,
    /// Temperature (base: kelvin).
    Temperature,
    /// Amount (base: mole).
    Amount,
}

/// An engine unit: name, symbol, dimension and factor to the base unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    name: &'static str,
    symbol: &'static str,
    dimension: BaseDimension,
    factor: f64,
}

impl Unit {
    /// Defines a unit; `factor` is the size of one `name` in base units.
    pub const fn new(
        name: &'static str,
        symbol: &'static str,
        dimension: BaseDimension,
        factor: f64,
    ) -> Self {
        Self {
            name,
            symbol,
            dimension,
            factor,
        }
    }

    /// Engine name, e.g. `"elementary charge"`.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Short symbol, e.g. `"e"`.
    pub const fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Base dimension.
    pub const fn dimension(&self) -> BaseDimension {
        self.dimension
    }

    /// `true` when both units measure the same dimension.
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Factor `f` such that `v_other = v_self * f`.
    pub fn conversion_factor_to(&self, other: &Unit) -> Result<f64, IncompatibleUnitError> {
        if !self.is_compatible(other) {
            return Err(IncompatibleUnitError {
                from: self.name,
                to: other.name,
            });
        }
        Ok(self.factor / other.factor)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Dalton.
pub const DALTON: Unit = Unit::new("dalton", "Da", BaseDimension::Mass, 1.0);
/// Atomic mass unit.
pub const AMU: Unit = Unit::new("amu", "u", BaseDimension::Mass, 1.0);
/// Nanometer.
pub const NANOMETER: Unit = Unit::new("nanometer", "nm", BaseDimension::Length, 1.0);
/// Angstrom.
pub const ANGSTROM: Unit = Unit::new("angstrom", "A", BaseDimension::Length, 0.1);
/// Picosecond.
pub const PICOSECOND: Unit = Unit::new("picosecond", "ps", BaseDimension::Time, 1.0);
/// Femtosecond.
pub const FEMTOSECOND: Unit = Unit::new("femtosecond", "fs", BaseDimension::Time, 1e-3);
/// Radian.
pub const RADIAN: Unit = Unit::new("radian", "rad", BaseDimension::Angle, 1.0);
/// Degree.
pub const DEGREE: Unit = Unit::new(
    "degree",
    "deg",
    BaseDimension::Angle,
    core::f64::consts::PI / 180.0,
);
/// Elementary charge.
pub const ELEMENTARY_CHARGE: Unit =
    Unit::new("elementary charge", "e", BaseDimension::Charge, 1.0);
/// Kilojoule per mole.
pub const KILOJOULE_PER_MOLE: Unit =
    Unit::new("kilojoule/mole", "kJ/mol", BaseDimension::MolarEnergy, 1.0);
/// Kilocalorie per mole.
pub const KILOCALORIE_PER_MOLE: Unit =
    Unit::new("kilocalorie/mole", "kcal/mol", BaseDimension::MolarEnergy, 4.184);
/// Kelvin.
pub const KELVIN: Unit = Unit::new("kelvin", "K", BaseDimension::Temperature, 1.0);
/// Mole.
pub const MOLE: Unit = Unit::new("mole", "mol", BaseDimension::Amount, 1.0);

/// Conversion between units of different dimensions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unit \"{from}\" is not compatible with unit \"{to}\"")]
pub struct IncompatibleUnitError {
    /// Source unit name.
    pub from: &'static str,
    /// Requested unit name.
    pub to: &'static str,
}

/// A 3-vector, used for positions, velocities and box vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    /// x component.
    pub x: f64,
    /// y component.
    pub y: f64,
    /// z component.
    pub z: f64,
}

impl Vec3 {
    /// Creates a vector.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components as an array.
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    fn scale(self, f: f64) -> Self {
        Self::new(self.x * f, self.y * f, self.z * f)
    }
}

/// The numeric payload of an engine quantity.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single number.
    Scalar(f64),
    /// One 3-vector.
    Vec3(Vec3),
    /// A list of numbers.
    List(Vec<f64>),
    /// A list of 3-vectors.
    Vec3List(Vec<Vec3>),
}

impl Value {
    fn scale(&self, f: f64) -> Self {
        match self {
            Value::Scalar(v) => Value::Scalar(v * f),
            Value::Vec3(v) => Value::Vec3(v.scale(f)),
            Value::List(vs) => Value::List(vs.iter().map(|v| v * f).collect()),
            Value::Vec3List(vs) => Value::Vec3List(vs.iter().map(|v| v.scale(f)).collect()),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

impl From<Vec3> for Value {
    fn from(v: Vec3) -> Self {
        Value::Vec3(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Value::List(v)
    }
}

impl From<Vec<Vec3>> for Value {
    fn from(v: Vec<Vec3>) -> Self {
        Value::Vec3List(v)
    }
}

/// A value tagged with an engine unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    value: Value,
    unit: Unit,
}

impl Quantity {
    /// Tags `value` with `unit`.
    pub fn new(value: impl Into<Value>, unit: Unit) -> Self {
        Self {
            value: value.into(),
            unit,
        }
    }

    /// The payload, in [`Quantity::unit`].
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The unit.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The payload expressed in `unit`.
    pub fn value_in_unit(&self, unit: Unit) -> Result<Value, IncompatibleUnitError> {
        if unit == self.unit {
            return Ok(self.value.clone());
        }
        let f = self.unit.conversion_factor_to(&unit)?;
        Ok(self.value.scale(f))
    }

    /// Same quantity expressed in `unit`.
    pub fn in_units_of(&self, unit: Unit) -> Result<Quantity, IncompatibleUnitError> {
        Ok(Quantity::new(self.value_in_unit(unit)?, unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::Scalar(v) => write!(f, "{} {}", v, self.unit.symbol),
            Value::Vec3(v) => write!(f, "({}, {}, {}) {}", v.x, v.y, v.z, self.unit.symbol),
            Value::List(vs) => write!(f, "{:?} {}", vs, self.unit.symbol),
            Value::Vec3List(vs) => {
                let parts: Vec<String> = vs
                    .iter()
                    .map(|v| format!("({}, {}, {})", v.x, v.y, v.z))
                    .collect();
                write!(f, "[{}] {}", parts.join(", "), self.unit.symbol)
            }
        }
    }
}
