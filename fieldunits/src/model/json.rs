//! JSON encode and load hooks.
//!
//! Quantities are written as `{"val": ..., "unit": "..."}`. On load, an
//! object with exactly those two keys becomes a native quantity before it
//! reaches the field's validator, so it is converted like any other
//! quantity; every other JSON value is handed over as plain raw input.

use std::sync::Arc;

use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use units_core::Quantity;

use super::{FieldType, Model, ModelError, Schema};
use crate::input::RawInput;

impl<T: FieldType> Serialize for Model<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present: Vec<_> = self
            .fields()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect();

        let mut map = serializer.serialize_map(Some(present.len()))?;
        for (name, value) in present {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<T: FieldType> Model<T> {
    /// Encodes the set fields as a JSON object, in declaration order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Encodes the set fields as a JSON value.
    pub fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Loads a model from a JSON object.
    ///
    /// # Errors
    ///
    /// [`ModelError::Json`] when `json` is not a JSON object,
    /// [`ModelError::Validation`] when its content does not validate.
    pub fn from_json(schema: &Arc<Schema<T>>, json: &str) -> Result<Self, ModelError> {
        let object: Map<String, Value> = serde_json::from_str(json)?;
        let values = object.into_iter().map(|(key, value)| {
            let raw = raw_from_json(value);
            (key, raw)
        });
        Ok(Model::new(schema, values)?)
    }
}

fn is_quantity_object(object: &Map<String, Value>) -> bool {
    object.len() == 2 && object.contains_key("val") && object.contains_key("unit")
}

fn raw_from_json(value: Value) -> RawInput {
    match value {
        Value::Object(object) if is_quantity_object(&object) => {
            match serde_json::from_value::<Quantity>(Value::Object(object.clone())) {
                Ok(q) => RawInput::Quantity(q),
                Err(e) => {
                    debug!("Not loading {:?} as a quantity: {}", object, e);
                    RawInput::from(Value::Object(object))
                }
            }
        }
        other => RawInput::from(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::model::FieldErrorKind;
    use crate::unit_type::{make_unit_type, AMU_QUANTITY, DEGREE_QUANTITY};
    use serde_json::json;
    use units_core::{NdArray, UnitId};

    fn schema() -> Arc<Schema> {
        Schema::builder("Frame")
            .field("mass", AMU_QUANTITY.clone())
            .optional_field("angle", DEGREE_QUANTITY.clone())
            .optional_field("box", make_unit_type("nanometer"))
            .config(ModelConfig::default())
            .build()
    }

    #[test]
    fn test_to_json_skips_unset_and_keeps_order() {
        let schema = schema();
        let m = Model::new(&schema, [("mass", RawInput::from(4.0))]).unwrap();
        assert_eq!(m.to_json().unwrap(), r#"{"mass":{"val":4.0,"unit":"amu"}}"#);
        assert_eq!(
            m.to_json_value().unwrap(),
            json!({"mass": {"val": 4.0, "unit": "amu"}})
        );
    }

    #[test]
    fn test_json_round_trip() {
        let schema = schema();
        let box_vectors = NdArray::new(vec![2, 2], vec![1.0, 0.0, 0.0, 2.0]).unwrap();
        let m = Model::new(
            &schema,
            [
                ("mass", RawInput::from(12.0)),
                ("angle", RawInput::from(90.0)),
                ("box", RawInput::from(box_vectors)),
            ],
        )
        .unwrap();

        let loaded = Model::from_json(&schema, &m.to_json().unwrap()).unwrap();
        assert_eq!(loaded, m);
    }

    #[test]
    fn test_from_json_converts_quantity_objects() {
        let schema = schema();
        let m = Model::from_json(
            &schema,
            r#"{"mass": {"val": 2, "unit": "dalton"}, "box": {"val": [15, 30], "unit": "angstrom"}}"#,
        )
        .unwrap();

        let mass = m.get("mass").unwrap();
        assert_eq!(mass.unit(), UnitId::Amu);
        assert!((mass.as_scalar().unwrap() - 2.0).abs() < 1e-12);

        let b = m.get("box").unwrap().magnitude().as_array().unwrap().data().to_vec();
        assert!((b[0] - 1.5).abs() < 1e-12);
        assert!((b[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_json_plain_values_take_field_unit() {
        let schema = schema();
        let m = Model::from_json(&schema, r#"{"mass": 7, "angle": "1 radian"}"#).unwrap();
        assert_eq!(m.get("mass").unwrap().as_scalar(), Some(7.0));
        assert_eq!(m.get("angle").unwrap().unit(), UnitId::Degree);
    }

    #[test]
    fn test_from_json_errors() {
        let schema = schema();
        assert!(matches!(
            Model::from_json(&schema, "[1, 2]"),
            Err(ModelError::Json(_))
        ));
        assert!(matches!(
            Model::from_json(&schema, "{"),
            Err(ModelError::Json(_))
        ));

        let err = Model::from_json(&schema, r#"{"mass": {"val": 1, "unit": "furlong"}}"#)
            .unwrap_err();
        match err {
            ModelError::Validation(v) => {
                assert!(matches!(v.for_field("mass"), Some(FieldErrorKind::Invalid(_))));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = Model::from_json(&schema, r#"{"mass": {"val": 1, "unit": "amu", "x": 0}}"#)
            .unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }
}
