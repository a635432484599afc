//! Unit-aware quantity fields for typed data models.
//!
//! A quantity field is declared with a target unit and accepts loosely typed
//! input: bare numbers, numeric lists and arrays, strings such as
//! `"15 angstrom"`, native [`Quantity`] values, raw integer buffers and,
//! with the `mm` feature, quantities from the molecular-mechanics engine unit
//! system. Every accepted value is stored as a [`Quantity`] in the target
//! unit; anything else fails with [`InvalidQuantity`].
//!
//! - [`coerce`] is the conversion itself.
//! - [`make_unit_type`] binds it to a unit as a field descriptor.
//! - [`model`] is the small schema/model layer that runs descriptors on
//!   construction and on every assignment, with JSON hooks.
//! - [`config`] loads model behaviour from TOML.
//!
//! ```rust
//! use fieldunits::{coerce, make_unit_type, RawInput};
//!
//! let charge = coerce(RawInput::from("1 elementary_charge"), "elementary_charge").unwrap();
//! assert_eq!(charge.as_scalar(), Some(1.0));
//!
//! let length = make_unit_type("nanometer");
//! assert!(length.validate("5 amu").is_err());
//! ```
//!
//! # Features
//!
//! - `mm` (default): accept `units_mm::Quantity` inputs and expose
//!   [`interop`].
//!
//! # Logging
//!
//! The crate logs through the `log` facade and installs no logger.
//! Coercion itself never logs.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod bytes;
mod coerce;
pub mod config;
mod error;
mod input;
#[cfg(feature = "mm")]
pub mod interop;
pub mod model;
mod unit_type;

pub use coerce::coerce;
pub use config::{ConfigError, ExtraPolicy, ModelConfig, Settings};
pub use error::{CoerceResult, InvalidQuantity};
pub use input::RawInput;
pub use model::{FieldType, Model, ModelError, Schema, ValidationError};
pub use unit_type::{
    make_unit_type, UnitType, AMU_QUANTITY, DEGREE_QUANTITY, ELEMENTARY_CHARGE_QUANTITY,
};

pub use units_core::{DimensionId, Magnitude, NdArray, Quantity, UnitError, UnitId};
