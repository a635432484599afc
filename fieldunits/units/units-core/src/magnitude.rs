//! Magnitudes: the numeric half of a quantity.
//!
//! A magnitude is a single number or a row-major n-dimensional array whose
//! data length always matches the product of its shape. Integers are kept as
//! `i64` so they survive untouched until a conversion scales them; scaling
//! always yields floats.

use crate::error::UnitError;
use core::fmt;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Row-major n-dimensional array, `f64` unless stated otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray<T = f64> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T> NdArray<T> {
    /// Creates an array, checking that `data` fills `shape` exactly.
    ///
    /// ```rust
    /// use units_core::NdArray;
    ///
    /// let a = NdArray::new(vec![2, 3], vec![0.0; 6]).unwrap();
    /// assert_eq!(a.shape(), &[2, 3]);
    /// assert!(NdArray::new(vec![2, 3], vec![0.0; 5]).is_err());
    /// ```
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, UnitError> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(UnitError::Shape(format!(
                "shape {:?} needs {} elements, got {}",
                shape,
                expected,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Creates a one-dimensional array.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// Dimensions of the array.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Flat, row-major element view.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the array, returning its flat data.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn into_parts(self) -> (Vec<usize>, Vec<T>) {
        (self.shape, self.data)
    }
}

impl<T: Copy> NdArray<T> {
    /// Applies `f` element-wise, keeping the shape.
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> NdArray<U> {
        NdArray {
            shape: self.shape.clone(),
            data: self.data.iter().copied().map(f).collect(),
        }
    }
}

impl NdArray {
    /// Stacks magnitudes along a new leading axis as floats.
    ///
    /// All scalars give a 1-D array; arrays of one common shape `s` give an
    /// array of shape `[n, s...]`. Mixed or ragged parts are rejected. No
    /// parts give the empty 1-D array. Integer parts are widened to `f64`;
    /// use [`Magnitude::stack`] to keep them exact.
    pub fn stack(parts: Vec<Magnitude>) -> Result<Self, UnitError> {
        stack_parts(parts.into_iter().map(Magnitude::into_float_parts))
    }
}

fn stack_parts<T>(
    parts: impl ExactSizeIterator<Item = (Vec<usize>, Vec<T>)>,
) -> Result<NdArray<T>, UnitError> {
    let n = parts.len();
    let mut inner: Option<Vec<usize>> = None;
    let mut data = Vec::new();

    for (shape, values) in parts {
        match &inner {
            None => inner = Some(shape),
            Some(expected) if *expected != shape => {
                return Err(UnitError::Shape(format!(
                    "cannot stack parts of shape {:?} and {:?}",
                    expected, shape
                )));
            }
            Some(_) => {}
        }
        data.extend(values);
    }

    let mut shape = vec![n];
    shape.extend(inner.unwrap_or_default());
    NdArray::new(shape, data)
}

fn fmt_axis<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    shape: &[usize],
    data: &[T],
) -> fmt::Result {
    f.write_str("[")?;
    if shape.len() == 1 {
        for (i, v) in data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", v)?;
        }
    } else {
        let stride: usize = shape[1..].iter().product();
        for i in 0..shape[0] {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt_axis(f, &shape[1..], &data[i * stride..(i + 1) * stride])?;
        }
    }
    f.write_str("]")
}

impl From<Vec<f64>> for NdArray {
    fn from(data: Vec<f64>) -> Self {
        Self::from_vec(data)
    }
}

impl<const N: usize> From<[f64; N]> for NdArray {
    fn from(data: [f64; N]) -> Self {
        Self::from_vec(data.to_vec())
    }
}

impl<T: fmt::Display> fmt::Display for NdArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shape.is_empty() {
            // zero-dimensional: a single element
            return write!(f, "{}", self.data[0]);
        }
        fmt_axis(f, &self.shape, &self.data)
    }
}

/// Numeric value of a quantity.
#[derive(Debug, Clone, PartialEq)]
pub enum Magnitude {
    /// A single float.
    Scalar(f64),
    /// A single integer, kept exact.
    Int(i64),
    /// An array of floats.
    Array(NdArray),
    /// An array of integers, kept exact.
    IntArray(NdArray<i64>),
}

impl Magnitude {
    /// Stacks magnitudes along a new leading axis.
    ///
    /// When every part is an integer the result is an integer array;
    /// otherwise every part is widened to `f64`, as in [`NdArray::stack`].
    ///
    /// ```rust
    /// use units_core::Magnitude;
    ///
    /// let big = (1i64 << 53) + 1;
    /// let m = Magnitude::stack(vec![Magnitude::Int(big), Magnitude::Int(-1)]).unwrap();
    /// assert_eq!(m.as_int_array().unwrap().data(), &[big, -1]);
    ///
    /// let m = Magnitude::stack(vec![Magnitude::Int(1), Magnitude::Scalar(0.5)]).unwrap();
    /// assert_eq!(m.as_array().unwrap().data(), &[1.0, 0.5]);
    /// ```
    pub fn stack(parts: Vec<Magnitude>) -> Result<Magnitude, UnitError> {
        if !parts.is_empty() && parts.iter().all(Magnitude::is_integer) {
            let parts: Vec<_> = parts
                .into_iter()
                .filter_map(Magnitude::into_int_parts)
                .collect();
            stack_parts(parts.into_iter()).map(Magnitude::IntArray)
        } else {
            NdArray::stack(parts).map(Magnitude::Array)
        }
    }

    /// Applies `f` to every number, keeping the shape. Integers are widened
    /// to `f64` first, so the result is always a float magnitude.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Magnitude::Scalar(v) => Magnitude::Scalar(f(*v)),
            Magnitude::Int(v) => Magnitude::Scalar(f(*v as f64)),
            Magnitude::Array(a) => Magnitude::Array(a.map(f)),
            Magnitude::IntArray(a) => Magnitude::Array(a.map(|v| f(v as f64))),
        }
    }

    /// The value if this is a scalar; integers are widened to `f64`.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Magnitude::Scalar(v) => Some(*v),
            Magnitude::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// The exact value if this is an integer scalar.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Magnitude::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The array if this is a float array.
    pub fn as_array(&self) -> Option<&NdArray> {
        match self {
            Magnitude::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The array if this is an integer array.
    pub fn as_int_array(&self) -> Option<&NdArray<i64>> {
        match self {
            Magnitude::IntArray(a) => Some(a),
            _ => None,
        }
    }

    /// Dimensions; empty for scalars.
    pub fn shape(&self) -> &[usize] {
        match self {
            Magnitude::Scalar(_) | Magnitude::Int(_) => &[],
            Magnitude::Array(a) => a.shape(),
            Magnitude::IntArray(a) => a.shape(),
        }
    }

    /// Flat row-major copy of the numbers, widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.clone().into_float_parts().1
    }

    /// `true` for a single number.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Magnitude::Scalar(_) | Magnitude::Int(_))
    }

    /// `true` when the numbers are stored as integers.
    pub fn is_integer(&self) -> bool {
        matches!(self, Magnitude::Int(_) | Magnitude::IntArray(_))
    }

    fn into_float_parts(self) -> (Vec<usize>, Vec<f64>) {
        match self {
            Magnitude::Scalar(v) => (Vec::new(), vec![v]),
            Magnitude::Int(v) => (Vec::new(), vec![v as f64]),
            Magnitude::Array(a) => a.into_parts(),
            Magnitude::IntArray(a) => {
                let (shape, data) = a.into_parts();
                (shape, data.into_iter().map(|v| v as f64).collect())
            }
        }
    }

    fn into_int_parts(self) -> Option<(Vec<usize>, Vec<i64>)> {
        match self {
            Magnitude::Int(v) => Some((Vec::new(), vec![v])),
            Magnitude::IntArray(a) => Some(a.into_parts()),
            _ => None,
        }
    }
}

impl From<f64> for Magnitude {
    fn from(v: f64) -> Self {
        Magnitude::Scalar(v)
    }
}

impl From<i64> for Magnitude {
    fn from(v: i64) -> Self {
        Magnitude::Int(v)
    }
}

impl From<NdArray> for Magnitude {
    fn from(a: NdArray) -> Self {
        Magnitude::Array(a)
    }
}

impl From<NdArray<i64>> for Magnitude {
    fn from(a: NdArray<i64>) -> Self {
        Magnitude::IntArray(a)
    }
}

impl From<Vec<f64>> for Magnitude {
    fn from(v: Vec<f64>) -> Self {
        Magnitude::Array(NdArray::from_vec(v))
    }
}

impl From<Vec<i64>> for Magnitude {
    fn from(v: Vec<i64>) -> Self {
        Magnitude::IntArray(NdArray::from_vec(v))
    }
}

impl<const N: usize> From<[f64; N]> for Magnitude {
    fn from(v: [f64; N]) -> Self {
        Magnitude::Array(NdArray::from(v))
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Magnitude::Scalar(v) => write!(f, "{}", v),
            Magnitude::Int(v) => write!(f, "{}", v),
            Magnitude::Array(a) => write!(f, "{}", a),
            Magnitude::IntArray(a) => write!(f, "{}", a),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde support: scalars as numbers, arrays as nested lists
// ─────────────────────────────────────────────────────────────────────────────

struct Axis<'a, T> {
    shape: &'a [usize],
    data: &'a [T],
}

impl<T: Serialize> Serialize for Axis<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.shape.is_empty() {
            return self.data[0].serialize(serializer);
        }

        let len = self.shape[0];
        let mut seq = serializer.serialize_seq(Some(len))?;
        if self.shape.len() == 1 {
            for v in self.data {
                seq.serialize_element(v)?;
            }
        } else {
            let stride: usize = self.shape[1..].iter().product();
            for i in 0..len {
                seq.serialize_element(&Axis {
                    shape: &self.shape[1..],
                    data: &self.data[i * stride..(i + 1) * stride],
                })?;
            }
        }
        seq.end()
    }
}

impl Serialize for Magnitude {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Magnitude::Scalar(v) => serializer.serialize_f64(*v),
            Magnitude::Int(v) => serializer.serialize_i64(*v),
            Magnitude::Array(a) => Axis {
                shape: &a.shape,
                data: &a.data,
            }
            .serialize(serializer),
            Magnitude::IntArray(a) => Axis {
                shape: &a.shape,
                data: &a.data,
            }
            .serialize(serializer),
        }
    }
}

// Variant order matters: integers that fit `i64` stay integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Nested {
    Int(i64),
    Number(f64),
    List(Vec<Nested>),
}

impl Nested {
    fn into_magnitude(self) -> Result<Magnitude, UnitError> {
        match self {
            Nested::Int(v) => Ok(Magnitude::Int(v)),
            Nested::Number(v) => Ok(Magnitude::Scalar(v)),
            Nested::List(items) => {
                let parts = items
                    .into_iter()
                    .map(Nested::into_magnitude)
                    .collect::<Result<Vec<_>, _>>()?;
                Magnitude::stack(parts)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Magnitude {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Nested::deserialize(deserializer)?
            .into_magnitude()
            .map_err(serde::de::Error::custom)
    }
}
