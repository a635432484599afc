//! Unit registry and conversion logic.
//!
//! Maps every [`UnitId`] to its metadata (dimension, scaling factor, name) and
//! implements conversion between compatible units.
//!
//! # Conversion Formula
//!
//! Conversions go through a canonical unit per dimension:
//! - Mass: Gram
//! - Length: Meter
//! - Time: Second
//! - Angle: Radian
//! - Charge: Coulomb
//! - Energy: Joule
//! - Molar energy: Joule per mole
//!
//! ```text
//! v_dst = v_src * (src.scale_to_canonical / dst.scale_to_canonical)
//! ```

use crate::error::UnitError;
use crate::types::{DimensionId, UnitId};

// =============================================================================
// Unit Metadata
// =============================================================================

/// Metadata about a unit.
#[derive(Debug, Clone, Copy)]
pub struct UnitMeta {
    /// The dimension this unit belongs to.
    pub dim: DimensionId,
    /// Scaling factor to convert to the canonical unit for this dimension.
    ///
    /// For example, for Kilojoule: `scale_to_canonical = 1000.0` (1 kJ = 1000 J)
    pub scale_to_canonical: f64,
    /// Canonical name of the unit.
    pub name: &'static str,
}

// =============================================================================
// Registry Functions
// =============================================================================

/// Returns metadata for the given unit ID.
#[inline]
pub fn meta(id: UnitId) -> UnitMeta {
    include!(concat!(env!("OUT_DIR"), "/unit_registry.rs"))
}

/// Returns the dimension for the given unit ID.
#[inline]
pub fn dimension(id: UnitId) -> DimensionId {
    meta(id).dim
}

/// Checks if two units are compatible (same dimension).
#[inline]
pub fn compatible(a: UnitId, b: UnitId) -> bool {
    dimension(a) == dimension(b)
}

/// Resolves a unit string, failing with [`UnitError::UndefinedUnit`].
pub fn resolve(unit: &str) -> Result<UnitId, UnitError> {
    UnitId::lookup(unit).ok_or_else(|| UnitError::UndefinedUnit(unit.trim().to_string()))
}

/// Returns the factor `f` such that `v_dst = v_src * f`.
///
/// # Errors
///
/// [`UnitError::Dimensionality`] if the units have different dimensions.
#[inline]
pub fn conversion_factor(src: UnitId, dst: UnitId) -> Result<f64, UnitError> {
    let src_meta = meta(src);
    let dst_meta = meta(dst);

    if src_meta.dim != dst_meta.dim {
        return Err(UnitError::Dimensionality {
            from: src,
            to: dst,
            from_dim: src_meta.dim,
            to_dim: dst_meta.dim,
        });
    }

    if src == dst {
        return Ok(1.0);
    }

    Ok(src_meta.scale_to_canonical / dst_meta.scale_to_canonical)
}

/// Converts a value from one unit to another.
///
/// ```rust
/// use units_core::{registry, UnitId};
///
/// let deg = registry::convert_value(core::f64::consts::PI, UnitId::Radian, UnitId::Degree);
/// assert!((deg.unwrap() - 180.0).abs() < 1e-12);
/// ```
#[inline]
pub fn convert_value(v: f64, src: UnitId, dst: UnitId) -> Result<f64, UnitError> {
    let factor = conversion_factor(src, dst)?;
    Ok(v * factor)
}
