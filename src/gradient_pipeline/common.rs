//! Common utilities module
//!
//! This module contains the error types and byte helpers shared across the pipeline.

pub mod error;

pub use error::{FormatError, PipelineError, Result};

/// Rounds to the nearest integer and clamps into the byte range.
#[inline]
pub fn clamp_byte(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Byte length of a `width * height` surface with `unit` bytes per element.
///
/// Fails with [`FormatError::SurfaceTooLarge`] instead of overflowing.
pub fn surface_len(width: usize, height: usize, unit: usize) -> std::result::Result<usize, FormatError> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(unit))
        .ok_or(FormatError::SurfaceTooLarge { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_len() {
        assert_eq!(surface_len(3, 2, 4), Ok(24));
        assert_eq!(surface_len(0, usize::MAX, 4), Ok(0));
        assert_eq!(
            surface_len(usize::MAX, 2, 1),
            Err(FormatError::SurfaceTooLarge { width: usize::MAX, height: 2 })
        );
        assert!(surface_len(1 << 40, 1 << 30, 4).is_err());
    }
}
