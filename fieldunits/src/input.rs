//! Raw values handed to a quantity field before coercion.

use std::collections::BTreeMap;
use units_core::{NdArray, Quantity};

/// A value as it arrives from a caller, before coercion.
///
/// The variant, not the shape of its payload, decides how the value is
/// coerced: a [`RawInput::Quantity`] is always converted, never rebuilt from
/// its numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// Bare integer.
    Int(i64),
    /// Bare float.
    Float(f64),
    /// String such as `"5 amu"`.
    Str(String),
    /// Raw little-endian native-width integers.
    Bytes(Vec<u8>),
    /// Ordered sequence, possibly nested.
    List(Vec<RawInput>),
    /// Fixed-shape numeric array.
    Array(NdArray),
    /// Quantity from `units-core`.
    Quantity(Quantity),
    /// Quantity from the molecular-mechanics unit system.
    #[cfg(feature = "mm")]
    Foreign(units_mm::Quantity),
    /// Boolean. Always rejected; never read as the integer 0 or 1.
    Bool(bool),
    /// Absent value.
    Null,
    /// Key/value mapping.
    Map(BTreeMap<String, RawInput>),
}

impl RawInput {
    /// Wraps a byte buffer. `Vec<u8>` has no `From` impl so that it is never
    /// confused with a list of small integers.
    pub fn bytes(buf: impl Into<Vec<u8>>) -> Self {
        RawInput::Bytes(buf.into())
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RawInput::Int(_) => "int",
            RawInput::Float(_) => "float",
            RawInput::Str(_) => "str",
            RawInput::Bytes(_) => "bytes",
            RawInput::List(_) => "list",
            RawInput::Array(_) => "array",
            RawInput::Quantity(_) => "quantity",
            #[cfg(feature = "mm")]
            RawInput::Foreign(_) => "mm quantity",
            RawInput::Bool(_) => "bool",
            RawInput::Null => "null",
            RawInput::Map(_) => "mapping",
        }
    }

    /// `true` for a value tagged by the molecular-mechanics unit system.
    pub fn is_foreign(&self) -> bool {
        #[cfg(feature = "mm")]
        {
            matches!(self, RawInput::Foreign(_))
        }
        #[cfg(not(feature = "mm"))]
        {
            false
        }
    }
}

impl From<i64> for RawInput {
    fn from(v: i64) -> Self {
        RawInput::Int(v)
    }
}

impl From<i32> for RawInput {
    fn from(v: i32) -> Self {
        RawInput::Int(i64::from(v))
    }
}

impl From<f64> for RawInput {
    fn from(v: f64) -> Self {
        RawInput::Float(v)
    }
}

impl From<bool> for RawInput {
    fn from(v: bool) -> Self {
        RawInput::Bool(v)
    }
}

impl From<&str> for RawInput {
    fn from(v: &str) -> Self {
        RawInput::Str(v.to_string())
    }
}

impl From<String> for RawInput {
    fn from(v: String) -> Self {
        RawInput::Str(v)
    }
}

impl From<Vec<f64>> for RawInput {
    fn from(v: Vec<f64>) -> Self {
        RawInput::List(v.into_iter().map(RawInput::Float).collect())
    }
}

impl From<Vec<i64>> for RawInput {
    fn from(v: Vec<i64>) -> Self {
        RawInput::List(v.into_iter().map(RawInput::Int).collect())
    }
}

impl From<Vec<RawInput>> for RawInput {
    fn from(v: Vec<RawInput>) -> Self {
        RawInput::List(v)
    }
}

impl From<NdArray> for RawInput {
    fn from(v: NdArray) -> Self {
        RawInput::Array(v)
    }
}

impl From<Quantity> for RawInput {
    fn from(v: Quantity) -> Self {
        RawInput::Quantity(v)
    }
}

#[cfg(feature = "mm")]
impl From<units_mm::Quantity> for RawInput {
    fn from(v: units_mm::Quantity) -> Self {
        RawInput::Foreign(v)
    }
}

#[cfg(feature = "mm")]
impl From<Vec<units_mm::Quantity>> for RawInput {
    fn from(v: Vec<units_mm::Quantity>) -> Self {
        RawInput::List(v.into_iter().map(RawInput::Foreign).collect())
    }
}

impl From<BTreeMap<String, RawInput>> for RawInput {
    fn from(v: BTreeMap<String, RawInput>) -> Self {
        RawInput::Map(v)
    }
}

impl From<serde_json::Value> for RawInput {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;

        match v {
            Value::Null => RawInput::Null,
            Value::Bool(b) => RawInput::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawInput::Int(i),
                // u64 above i64::MAX and every non-integer
                None => RawInput::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => RawInput::Str(s),
            Value::Array(items) => RawInput::List(items.into_iter().map(RawInput::from).collect()),
            Value::Object(map) => RawInput::Map(
                map.into_iter()
                    .map(|(k, v)| (k, RawInput::from(v)))
                    .collect(),
            ),
        }
    }
}
