//! Minimal typed data-model framework.
//!
//! A [`Schema`] is an ordered list of named fields, each with a
//! [`FieldType`] that turns raw input into the stored value. A [`Model`] is
//! one instance of a schema. Every value passes through its field's
//! validator, both at construction and on each later assignment, so a model
//! never holds a value its field type would reject.
//!
//! ```rust
//! use fieldunits::model::{Model, Schema};
//! use fieldunits::{RawInput, AMU_QUANTITY, DEGREE_QUANTITY};
//!
//! let schema = Schema::builder("Bond")
//!     .field("mass", AMU_QUANTITY.clone())
//!     .field("angle", DEGREE_QUANTITY.clone())
//!     .build();
//!
//! let mut bond = Model::new(&schema, [
//!     ("mass", RawInput::from("12 amu")),
//!     ("angle", RawInput::from(104.5)),
//! ])
//! .unwrap();
//!
//! assert!(bond.set("angle", "3 amu").is_err());
//! assert_eq!(bond.get("angle").unwrap().as_scalar(), Some(104.5));
//! ```

mod error;
mod json;
mod schema;

pub use error::{FieldError, FieldErrorKind, ModelError, ValidationError};
pub use schema::{FieldSpec, Schema, SchemaBuilder};

use std::fmt;
use std::sync::Arc;

use log::{debug, trace, warn};
use serde::Serialize;

use crate::config::ExtraPolicy;
use crate::error::InvalidQuantity;
use crate::input::RawInput;
use crate::unit_type::UnitType;

/// A field type: how raw input becomes a stored value.
pub trait FieldType: Send + Sync {
    /// Stored representation.
    type Value: Clone + fmt::Debug + PartialEq + Serialize;

    /// Turns `raw` into the stored value or rejects it.
    fn validate(&self, raw: RawInput) -> Result<Self::Value, InvalidQuantity>;

    /// Short human-readable description, for diagnostics.
    fn describe(&self) -> String;
}

/// One validated instance of a [`Schema`].
pub struct Model<T: FieldType = UnitType> {
    schema: Arc<Schema<T>>,
    values: Vec<Option<T::Value>>,
}

impl<T: FieldType> Model<T> {
    /// Validates `values` against `schema`.
    ///
    /// Every problem is collected: invalid values, missing required fields
    /// and, unless the schema ignores them, undeclared keys. When a key
    /// appears twice the later value wins.
    pub fn new<I, K, V>(schema: &Arc<Schema<T>>, values: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawInput>,
    {
        let mut slots: Vec<Option<T::Value>> = schema.fields().iter().map(|_| None).collect();
        let mut errors = Vec::new();

        for (key, raw) in values {
            let key = key.into();
            match schema.index_of(&key) {
                Some(i) => {
                    // A repeated key replaces whatever the earlier one left behind.
                    errors.retain(|e: &FieldError| e.field != key);
                    match schema.fields()[i].ty().validate(raw.into()) {
                        Ok(value) => slots[i] = Some(value),
                        Err(e) => {
                            debug!("{}.{} rejected: {}", schema.name(), key, e.detailed());
                            slots[i] = None;
                            errors.push(FieldError::new(key, FieldErrorKind::Invalid(e)));
                        }
                    }
                }
                None => match schema.config().extra {
                    ExtraPolicy::Forbid => {
                        errors.push(FieldError::new(key, FieldErrorKind::Extra));
                    }
                    ExtraPolicy::Ignore => {
                        warn!("Ignoring unknown input '{}' for {}", key, schema.name());
                    }
                },
            }
        }

        for (spec, slot) in schema.fields().iter().zip(&slots) {
            let reported = errors.iter().any(|e| e.field == spec.name());
            if spec.is_required() && slot.is_none() && !reported {
                errors.push(FieldError::new(spec.name(), FieldErrorKind::Missing));
            }
        }

        if !errors.is_empty() {
            return Err(ValidationError {
                model: schema.name().to_string(),
                errors,
            });
        }

        Ok(Self {
            schema: Arc::clone(schema),
            values: slots,
        })
    }

    /// Validates `raw` and assigns it to `name`.
    ///
    /// On failure the previous value is kept.
    pub fn set(&mut self, name: &str, raw: impl Into<RawInput>) -> Result<(), ValidationError> {
        let model = self.schema.name();

        if self.schema.config().frozen {
            return Err(ValidationError::single(
                model,
                FieldError::new(name, FieldErrorKind::Frozen),
            ));
        }

        let index = self.schema.index_of(name).ok_or_else(|| {
            ValidationError::single(model, FieldError::new(name, FieldErrorKind::Unknown))
        })?;

        match self.schema.fields()[index].ty().validate(raw.into()) {
            Ok(value) => {
                trace!("{}.{} = {:?}", model, name, value);
                self.values[index] = Some(value);
                Ok(())
            }
            Err(e) => {
                debug!("{}.{} rejected: {}", model, name, e.detailed());
                Err(ValidationError::single(
                    model,
                    FieldError::new(name, FieldErrorKind::Invalid(e)),
                ))
            }
        }
    }

    /// Current value of `name`; `None` for unknown or unset fields.
    pub fn get(&self, name: &str) -> Option<&T::Value> {
        self.schema
            .index_of(name)
            .and_then(|i| self.values[i].as_ref())
    }

    /// Fields in declaration order with their current values.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Option<&T::Value>)> + '_ {
        self.schema
            .fields()
            .iter()
            .zip(&self.values)
            .map(|(spec, value)| (spec.name(), value.as_ref()))
    }

    /// Schema this model was built from.
    pub fn schema(&self) -> &Arc<Schema<T>> {
        &self.schema
    }
}

impl<T: FieldType> Clone for Model<T> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            values: self.values.clone(),
        }
    }
}

impl<T: FieldType> fmt::Debug for Model<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.schema.name());
        for (name, value) in self.fields() {
            s.field(name, &value);
        }
        s.finish()
    }
}

impl<T: FieldType> PartialEq for Model<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema) && self.values == other.values
    }
}
