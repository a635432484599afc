use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fieldunits::{coerce, Model, RawInput, Schema, AMU_QUANTITY, DEGREE_QUANTITY};
use units_core::{NdArray, Quantity, UnitId};

fn bench_scalar_inputs(c: &mut Criterion) {
    let mut group = c.benchmark_group("coerce_scalar");

    group.bench_function("bare_float", |b| {
        b.iter(|| coerce(black_box(RawInput::Float(12.011)), black_box("amu")));
    });

    let q = Quantity::new(3.14159, UnitId::Radian);
    group.bench_function("native_quantity", |b| {
        b.iter(|| coerce(black_box(RawInput::Quantity(q.clone())), black_box("degree")));
    });

    group.bench_function("string", |b| {
        b.iter(|| coerce(black_box(RawInput::from("15 angstrom")), black_box("nanometer")));
    });

    group.finish();
}

fn bench_array_inputs(c: &mut Criterion) {
    let mut group = c.benchmark_group("coerce_array");

    for n in [3usize, 300, 30_000] {
        let data: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();

        let list = RawInput::from(data.clone());
        group.bench_with_input(BenchmarkId::new("numeric_list", n), &list, |b, input| {
            b.iter(|| coerce(black_box(input.clone()), "nanometer"));
        });

        let q = Quantity::new(NdArray::from_vec(data), UnitId::Angstrom);
        let raw = RawInput::Quantity(q);
        group.bench_with_input(BenchmarkId::new("native_array", n), &raw, |b, input| {
            b.iter(|| coerce(black_box(input.clone()), "nanometer"));
        });

        let buf: Vec<u8> = (0..n as isize).flat_map(|v| v.to_le_bytes()).collect();
        let bytes = RawInput::bytes(buf);
        group.bench_with_input(BenchmarkId::new("bytes", n), &bytes, |b, input| {
            b.iter(|| coerce(black_box(input.clone()), "elementary_charge"));
        });
    }

    group.finish();
}

#[cfg(feature = "mm")]
fn bench_engine_inputs(c: &mut Criterion) {
    use units_mm::{Vec3, ANGSTROM, NANOMETER};

    let mut group = c.benchmark_group("coerce_engine");

    let box_vectors = RawInput::from(vec![
        units_mm::Quantity::new(Vec3::new(3.0, 0.0, 0.0), NANOMETER),
        units_mm::Quantity::new(Vec3::new(0.0, 30.0, 0.0), ANGSTROM),
        units_mm::Quantity::new(Vec3::new(0.0, 0.0, 3.0), NANOMETER),
    ]);
    group.bench_function("box_vectors", |b| {
        b.iter(|| coerce(black_box(box_vectors.clone()), "angstrom"));
    });

    group.finish();
}

#[cfg(not(feature = "mm"))]
fn bench_engine_inputs(_c: &mut Criterion) {}

fn bench_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("model");

    let schema = Schema::builder("Atom")
        .field("mass", AMU_QUANTITY.clone())
        .field("angle", DEGREE_QUANTITY.clone())
        .build();

    group.bench_function("new", |b| {
        b.iter(|| {
            Model::new(
                &schema,
                [
                    ("mass", RawInput::from("12 amu")),
                    ("angle", RawInput::from(104.5)),
                ],
            )
        });
    });

    let json = r#"{"mass": {"val": 12.0, "unit": "dalton"}, "angle": 104.5}"#;
    group.bench_function("from_json", |b| {
        b.iter(|| Model::from_json(&schema, black_box(json)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scalar_inputs,
    bench_array_inputs,
    bench_engine_inputs,
    bench_model
);
criterion_main!(benches);
