//! Runtime-tagged physical quantities.
//!
//! `units-core` is the quantity library the coercion layer is built on:
//!
//! - A closed registry of units ([`UnitId`]), generated from `units.csv`, each
//!   belonging to one [`DimensionId`] with a scale to its dimension's
//!   canonical unit.
//! - A [`Quantity`] pairs a [`Magnitude`] (scalar or [`NdArray`]) with a unit.
//! - Conversion between units of the same dimension is a single multiplication;
//!   conversion across dimensions fails with [`UnitError::Dimensionality`].
//! - Strings such as `"5 amu"` parse into quantities.
//!
//! # What this crate does not try to solve
//!
//! - Symbolic unit algebra (`kg * m / s^2`) or user-defined units. Compound
//!   units that the registry needs (`kJ/mol`) are listed as units of their own.
//! - Offset units (degrees Celsius); every conversion is a pure scale.
//!
//! # Quick start
//!
//! ```rust
//! use units_core::{Quantity, UnitId};
//!
//! let q: Quantity = "5 dalton".parse().unwrap();
//! let amu = q.to("amu").unwrap();
//! assert_eq!(amu.unit(), UnitId::Amu);
//! assert_eq!(amu.as_scalar(), Some(5.0));
//! ```
//!
//! # Thread Safety
//!
//! The registry is compiled in; there is no global mutable state.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod magnitude;
pub mod parse;
mod quantity;
pub mod registry;
mod types;

pub use error::{UnitError, UnitResult};
pub use magnitude::{Magnitude, NdArray};
pub use quantity::Quantity;
pub use registry::UnitMeta;
pub use types::{DimensionId, UnitId};
