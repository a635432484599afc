//! Error type for quantity construction, parsing and conversion.

use crate::types::{DimensionId, UnitId};

/// Result type for quantity operations.
pub type UnitResult<T> = Result<T, UnitError>;

/// Error type for quantity operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    /// The string does not name a unit known to the registry.
    #[error("undefined unit '{0}'")]
    UndefinedUnit(String),

    /// Source and destination units measure different dimensions.
    #[error("cannot convert from '{from}' ({from_dim}) to '{to}' ({to_dim})")]
    Dimensionality {
        /// Unit of the value being converted.
        from: UnitId,
        /// Requested unit.
        to: UnitId,
        /// Dimension of `from`.
        from_dim: DimensionId,
        /// Dimension of `to`.
        to_dim: DimensionId,
    },

    /// A string could not be read as `<number> <unit>`.
    #[error("cannot parse '{input}' as a quantity: {reason}")]
    Parse {
        /// The offending input.
        input: String,
        /// What went wrong.
        reason: String,
    },

    /// Array data does not match its declared shape, or is ragged.
    #[error("invalid magnitude shape: {0}")]
    Shape(String),
}

impl UnitError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        UnitError::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
