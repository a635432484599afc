//! Decoding of raw binary magnitudes.
//!
//! A buffer is a flat run of little-endian signed integers of the platform's
//! native width, with the element count implied by the buffer length. This
//! module only decodes; producing such buffers is up to whoever serialized
//! them.

use units_core::UnitError;

/// Width in bytes of one encoded integer.
pub const NATIVE_INT_WIDTH: usize = std::mem::size_of::<isize>();

/// Decodes `buf` into native-width signed integers.
///
/// # Errors
///
/// [`UnitError::Shape`] when the length is not a multiple of
/// [`NATIVE_INT_WIDTH`].
///
/// ```rust
/// use fieldunits::bytes::{decode_native_ints, NATIVE_INT_WIDTH};
///
/// let buf: Vec<u8> = [3isize, -1].iter().flat_map(|v| v.to_le_bytes()).collect();
/// assert_eq!(buf.len(), 2 * NATIVE_INT_WIDTH);
/// assert_eq!(decode_native_ints(&buf).unwrap(), vec![3, -1]);
/// ```
pub fn decode_native_ints(buf: &[u8]) -> Result<Vec<isize>, UnitError> {
    if buf.len() % NATIVE_INT_WIDTH != 0 {
        return Err(UnitError::Shape(format!(
            "buffer of {} bytes is not a multiple of the {}-byte element size",
            buf.len(),
            NATIVE_INT_WIDTH
        )));
    }

    Ok(buf
        .chunks_exact(NATIVE_INT_WIDTH)
        .map(|chunk| {
            let mut raw = [0u8; NATIVE_INT_WIDTH];
            raw.copy_from_slice(chunk);
            isize::from_le_bytes(raw)
        })
        .collect())
}
