//! End-to-end tests of quantity fields inside models.

use std::sync::Arc;

use approx::assert_relative_eq;
use fieldunits::model::FieldErrorKind;
use fieldunits::{
    make_unit_type, ExtraPolicy, Model, ModelError, RawInput, Schema, Settings, AMU_QUANTITY,
    DEGREE_QUANTITY, ELEMENTARY_CHARGE_QUANTITY,
};
use serde_json::json;
use units_core::{NdArray, Quantity, UnitId};

fn particle_schema(settings: &Settings) -> Arc<Schema> {
    Schema::builder("Particle")
        .field("mass", AMU_QUANTITY.clone())
        .field("charge", ELEMENTARY_CHARGE_QUANTITY.clone())
        .optional_field("torsion", DEGREE_QUANTITY.clone())
        .optional_field("box_vectors", make_unit_type("nanometer"))
        .settings(settings)
        .build()
}

#[test]
fn test_mixed_inputs_end_up_in_field_units() {
    let schema = particle_schema(&Settings::default());
    let m = Model::new(
        &schema,
        [
            ("mass", RawInput::from("1.5e1 Da")),
            ("charge", RawInput::from(vec![0.5, -0.5])),
            ("torsion", RawInput::from(Quantity::new(1.0, UnitId::Radian))),
            ("box_vectors", RawInput::List(vec![RawInput::from("20 angstrom")])),
        ],
    );

    // a list of strings is not a numeric list
    let err = m.unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert!(matches!(
        err.for_field("box_vectors"),
        Some(FieldErrorKind::Invalid(_))
    ));

    let m = Model::new(
        &schema,
        [
            ("mass", RawInput::from("1.5e1 Da")),
            ("charge", RawInput::from(vec![0.5, -0.5])),
            ("torsion", RawInput::from(Quantity::new(1.0, UnitId::Radian))),
            (
                "box_vectors",
                RawInput::from(Quantity::new(
                    NdArray::new(vec![3, 3], vec![20.0, 0.0, 0.0, 0.0, 20.0, 0.0, 0.0, 0.0, 20.0])
                        .unwrap(),
                    UnitId::Angstrom,
                )),
            ),
        ],
    )
    .unwrap();

    let mass = m.get("mass").unwrap();
    assert_eq!(mass.unit(), UnitId::Amu);
    assert_relative_eq!(mass.as_scalar().unwrap(), 15.0, epsilon = 1e-12);

    let torsion = m.get("torsion").unwrap();
    assert_relative_eq!(torsion.as_scalar().unwrap(), 57.295_779_513, epsilon = 1e-6);

    let bv = m.get("box_vectors").unwrap();
    assert_eq!(bv.unit(), UnitId::Nanometer);
    let arr = bv.magnitude().as_array().unwrap();
    assert_eq!(arr.shape(), &[3, 3]);
    assert_relative_eq!(arr.data()[0], 2.0, epsilon = 1e-12);
    assert_relative_eq!(arr.data()[4], 2.0, epsilon = 1e-12);
}

#[test]
fn test_frozen_settings_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fieldunits.toml");
    std::fs::write(&path, "[model]\nfrozen = true\n").unwrap();

    let settings = Settings::from_file(&path).unwrap();
    let schema = particle_schema(&settings);
    let mut m = Model::new(
        &schema,
        [("mass", RawInput::from(1.0)), ("charge", RawInput::from(0))],
    )
    .unwrap();

    let err = m.set("torsion", 90).unwrap_err();
    assert_eq!(err.for_field("torsion"), Some(&FieldErrorKind::Frozen));
    assert!(m.get("torsion").is_none());
}

#[test]
fn test_ignored_extra_keys() {
    let settings = Settings::from_toml_str("[model]\nextra = \"ignore\"").unwrap();
    assert_eq!(settings.model.extra, ExtraPolicy::Ignore);

    let schema = particle_schema(&settings);
    let m = Model::from_json(&schema, r#"{"mass": 1, "charge": 0, "spin": 0.5}"#).unwrap();
    let names: Vec<_> = m.fields().map(|(name, _)| name).collect();
    assert_eq!(names, ["mass", "charge", "torsion", "box_vectors"]);
}

#[test]
fn test_json_hooks() {
    let schema = particle_schema(&Settings::default());
    let m = Model::from_json(
        &schema,
        r#"{
            "mass": {"val": 2000, "unit": "gram"},
            "charge": "-1 e",
            "torsion": 180
        }"#,
    );
    // grams convert to amu without trouble; the magnitude is just large
    let m = m.unwrap();
    assert_eq!(m.get("charge").unwrap(), &Quantity::new(-1.0, UnitId::ElementaryCharge));
    assert_eq!(m.get("torsion").unwrap().as_scalar(), Some(180.0));

    let value = m.to_json_value().unwrap();
    assert_eq!(value["charge"], json!({"val": -1.0, "unit": "elementary_charge"}));
    assert_eq!(value["mass"]["unit"], json!("amu"));
    assert!(value.get("box_vectors").is_none());

    let reloaded = Model::from_json(&schema, &m.to_json().unwrap()).unwrap();
    assert_relative_eq!(
        reloaded.get("mass").unwrap().as_scalar().unwrap(),
        m.get("mass").unwrap().as_scalar().unwrap(),
        max_relative = 1e-12
    );
}

#[test]
fn test_json_validation_errors_are_reported_together() {
    let schema = particle_schema(&Settings::default());
    let err = Model::from_json(&schema, r#"{"mass": true, "torsion": {"a": 1}}"#).unwrap_err();
    let ModelError::Validation(v) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(v.errors.len(), 3);
    assert!(matches!(v.for_field("mass"), Some(FieldErrorKind::Invalid(_))));
    assert!(matches!(v.for_field("torsion"), Some(FieldErrorKind::Invalid(_))));
    assert_eq!(v.for_field("charge"), Some(&FieldErrorKind::Missing));
}

#[cfg(feature = "mm")]
#[test]
fn test_engine_box_vectors() {
    use units_mm::{Vec3, ANGSTROM, NANOMETER};

    let schema = particle_schema(&Settings::default());
    let mut m = Model::new(
        &schema,
        [("mass", RawInput::from(1.0)), ("charge", RawInput::from(0))],
    )
    .unwrap();

    m.set(
        "box_vectors",
        vec![
            units_mm::Quantity::new(Vec3::new(30.0, 0.0, 0.0), ANGSTROM),
            units_mm::Quantity::new(Vec3::new(0.0, 3.0, 0.0), NANOMETER),
            units_mm::Quantity::new(Vec3::new(0.0, 0.0, 30.0), ANGSTROM),
        ],
    )
    .unwrap();

    let arr = m.get("box_vectors").unwrap().magnitude().as_array().unwrap().clone();
    assert_eq!(arr.shape(), &[3, 3]);
    for (i, expected) in [3.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 3.0].iter().enumerate() {
        assert_relative_eq!(arr.data()[i], *expected, epsilon = 1e-9);
    }
}
