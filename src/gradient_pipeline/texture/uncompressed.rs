//! Uncompressed DDS surfaces described by per-channel bit masks.

use crate::gradient_pipeline::common::{FormatError, clamp_byte, surface_len};
use crate::gradient_pipeline::texture::types::ChannelMasks;

/// Scales the masked bits of `pixel` to 0..=255. A zero mask yields `default`.
pub fn extract_masked_channel(pixel: u32, mask: u32, default: f64) -> f64 {
    if mask == 0 {
        return default;
    }
    let shift = mask.trailing_zeros();
    let bits = mask.count_ones();
    let max = (1u64 << bits) - 1;
    let raw = u64::from((pixel & mask) >> shift);
    raw as f64 / max as f64 * 255.0
}

/// Decodes a 24- or 32-bit masked surface into RGBA8.
pub fn decode_uncompressed(
    data: &[u8],
    width: usize,
    height: usize,
    rgb_bit_count: u32,
    masks: ChannelMasks,
) -> Result<Vec<u8>, FormatError> {
    let bpp = match rgb_bit_count {
        24 => 3,
        32 => 4,
        bit_count => return Err(FormatError::UnsupportedPixelSize { bit_count }),
    };

    let needed = surface_len(width, height, bpp)?;
    let out_len = surface_len(width, height, 4)?;
    if data.len() < needed {
        return Err(FormatError::Truncated {
            needed,
            available: data.len(),
        });
    }

    let mut out = vec![0u8; out_len];
    for (px, rgba) in data[..needed].chunks_exact(bpp).zip(out.chunks_exact_mut(4)) {
        let value = match bpp {
            4 => u32::from_le_bytes([px[0], px[1], px[2], px[3]]),
            _ => u32::from_le_bytes([px[0], px[1], px[2], 0]),
        };
        rgba[0] = clamp_byte(extract_masked_channel(value, masks.r, 0.0));
        rgba[1] = clamp_byte(extract_masked_channel(value, masks.g, 0.0));
        rgba[2] = clamp_byte(extract_masked_channel(value, masks.b, 0.0));
        rgba[3] = clamp_byte(extract_masked_channel(value, masks.a, 255.0));
    }
    Ok(out)
}
