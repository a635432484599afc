//! The single error kind surfaced by coercion.

use std::error::Error as _;
use units_core::UnitError;

/// Result type for coercion.
pub type CoerceResult<T> = Result<T, InvalidQuantity>;

/// A raw value could not be turned into a quantity in the requested unit.
///
/// Whatever went wrong underneath (unknown unit, dimension mismatch,
/// malformed string or buffer, unsupported input) is reported as this one
/// type; the underlying [`UnitError`], when there is one, is kept as
/// [`std::error::Error::source`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot coerce {input} into a quantity in '{target}'")]
pub struct InvalidQuantity {
    target: String,
    input: &'static str,
    #[source]
    cause: Option<UnitError>,
}

impl InvalidQuantity {
    pub(crate) fn new(target: &str, input: &'static str, cause: Option<UnitError>) -> Self {
        Self {
            target: target.to_string(),
            input,
            cause,
        }
    }

    /// Unit the value was being coerced into.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Kind of raw input that was rejected (`"str"`, `"mapping"`, …).
    pub fn input_kind(&self) -> &'static str {
        self.input
    }

    /// Underlying failure, if any.
    pub fn cause(&self) -> Option<&UnitError> {
        self.cause.as_ref()
    }

    /// Message including the underlying failure, for diagnostics.
    pub fn detailed(&self) -> String {
        match self.source() {
            Some(source) => format!("{}: {}", self, source),
            None => self.to_string(),
        }
    }
}
