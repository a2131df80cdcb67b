//! S3TC (BC1-BC3) block decoding.
//!
//! Each 4x4 texel block stores two RGB565 endpoints and sixteen 2-bit palette
//! indices. DXT3 prefixes an explicit 4-bit alpha per texel, DXT5 prefixes two
//! alpha endpoints and sixteen 3-bit indices into an interpolated ramp.
//! Texels of edge blocks that fall outside the surface are skipped.

use crate::gradient_pipeline::common::{FormatError, clamp_byte, surface_len};

type Rgba = [f64; 4];
type Rgb = [f64; 3];

/// Block compression variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockFormat {
    Dxt1,
    Dxt3,
    Dxt5,
}

impl BlockFormat {
    pub fn block_bytes(self) -> usize {
        match self {
            BlockFormat::Dxt1 => 8,
            BlockFormat::Dxt3 | BlockFormat::Dxt5 => 16,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockFormat::Dxt1 => "DXT1",
            BlockFormat::Dxt3 => "DXT3",
            BlockFormat::Dxt5 => "DXT5",
        }
    }
}

/// Expands a packed RGB565 value to 0..=255 floats.
pub fn decode_565(v: u16) -> Rgb {
    let r = f64::from((v >> 11) & 0x1f) * 255.0 / 31.0;
    let g = f64::from((v >> 5) & 0x3f) * 255.0 / 63.0;
    let b = f64::from(v & 0x1f) * 255.0 / 31.0;
    [r, g, b]
}

fn mix(a: Rgb, b: Rgb, wa: f64, wb: f64, div: f64) -> Rgb {
    [
        (wa * a[0] + wb * b[0]) / div,
        (wa * a[1] + wb * b[1]) / div,
        (wa * a[2] + wb * b[2]) / div,
    ]
}

/// Four-entry DXT1 palette. `c0 <= c1` selects the three-color mode
/// whose last entry is transparent black.
pub fn dxt1_palette(c0: u16, c1: u16) -> [Rgba; 4] {
    let p0 = decode_565(c0);
    let p1 = decode_565(c1);
    let opaque = |c: Rgb| [c[0], c[1], c[2], 255.0];

    if c0 > c1 {
        [
            opaque(p0),
            opaque(p1),
            opaque(mix(p0, p1, 2.0, 1.0, 3.0)),
            opaque(mix(p0, p1, 1.0, 2.0, 3.0)),
        ]
    } else {
        [
            opaque(p0),
            opaque(p1),
            opaque(mix(p0, p1, 1.0, 1.0, 2.0)),
            [0.0, 0.0, 0.0, 0.0],
        ]
    }
}

/// DXT3/DXT5 color palette, always four-color mode.
pub fn four_color_palette(c0: u16, c1: u16) -> [Rgb; 4] {
    let p0 = decode_565(c0);
    let p1 = decode_565(c1);
    [p0, p1, mix(p0, p1, 2.0, 1.0, 3.0), mix(p0, p1, 1.0, 2.0, 3.0)]
}

/// DXT5 alpha ramp. `alpha0 <= alpha1` selects the six-step ramp with
/// explicit 0 and 255 entries.
pub fn dxt5_alpha_palette(alpha0: u8, alpha1: u8) -> [f64; 8] {
    let a0 = f64::from(alpha0);
    let a1 = f64::from(alpha1);
    let mut p = [0.0; 8];
    p[0] = a0;
    p[1] = a1;
    if alpha0 > alpha1 {
        for i in 1..=6 {
            let w = f64::from(i);
            p[i as usize + 1] = ((7.0 - w) * a0 + w * a1) / 7.0;
        }
    } else {
        for i in 1..=4 {
            let w = f64::from(i);
            p[i as usize + 1] = ((5.0 - w) * a0 + w * a1) / 5.0;
        }
        p[6] = 0.0;
        p[7] = 255.0;
    }
    p
}

fn read_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

fn read_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

/// Combines `len` little-endian bytes into one integer.
fn read_le_bits(b: &[u8], at: usize, len: usize) -> u64 {
    b[at..at + len]
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, &byte)| acc | (u64::from(byte) << (i * 8)))
}

fn set_rgba(out: &mut [u8], px_index: usize, rgba: Rgba) {
    let o = px_index * 4;
    for c in 0..4 {
        out[o + c] = clamp_byte(rgba[c]);
    }
}

/// Decodes a whole block-compressed surface into RGBA8.
pub fn decode_blocks(
    data: &[u8],
    width: usize,
    height: usize,
    format: BlockFormat,
) -> Result<Vec<u8>, FormatError> {
    let bw = width.div_ceil(4);
    let bh = height.div_ceil(4);
    let needed = surface_len(bw, bh, format.block_bytes())?;
    let out_len = surface_len(width, height, 4)?;
    if data.len() < needed {
        return Err(FormatError::Truncated {
            needed,
            available: data.len(),
        });
    }

    let mut out = vec![0u8; out_len];
    let mut texels = [[0.0f64; 4]; 16];

    for (block_index, block) in data[..needed]
        .chunks_exact(format.block_bytes())
        .enumerate()
    {
        decode_block(block, format, &mut texels);

        let bx = block_index % bw;
        let by = block_index / bw;
        for py in 0..4 {
            for px in 0..4 {
                let x = bx * 4 + px;
                let y = by * 4 + py;
                if x >= width || y >= height {
                    continue;
                }
                set_rgba(&mut out, y * width + x, texels[py * 4 + px]);
            }
        }
    }

    Ok(out)
}

/// Decodes one block into sixteen RGBA texels in row-major order.
fn decode_block(block: &[u8], format: BlockFormat, texels: &mut [Rgba; 16]) {
    match format {
        BlockFormat::Dxt1 => {
            let palette = dxt1_palette(read_u16(block, 0), read_u16(block, 2));
            let code = read_u32(block, 4);
            for (pi, texel) in texels.iter_mut().enumerate() {
                let ci = ((code >> (pi * 2)) & 0x03) as usize;
                *texel = palette[ci];
            }
        }
        BlockFormat::Dxt3 => {
            let alpha_bits = read_le_bits(block, 0, 8);
            let palette = four_color_palette(read_u16(block, 8), read_u16(block, 10));
            let code = read_u32(block, 12);
            for (pi, texel) in texels.iter_mut().enumerate() {
                let ci = ((code >> (pi * 2)) & 0x03) as usize;
                let nibble = (alpha_bits >> (pi * 4)) & 0x0f;
                let rgb = palette[ci];
                *texel = [rgb[0], rgb[1], rgb[2], (nibble * 17) as f64];
            }
        }
        BlockFormat::Dxt5 => {
            let alpha_palette = dxt5_alpha_palette(block[0], block[1]);
            // 16 x 3-bit indices packed into a 48-bit little-endian field
            let alpha_code = read_le_bits(block, 2, 6);
            let palette = four_color_palette(read_u16(block, 8), read_u16(block, 10));
            let code = read_u32(block, 12);
            for (pi, texel) in texels.iter_mut().enumerate() {
                let ci = ((code >> (pi * 2)) & 0x03) as usize;
                let ai = ((alpha_code >> (pi * 3)) & 0x07) as usize;
                let rgb = palette[ci];
                *texel = [rgb[0], rgb[1], rgb[2], alpha_palette[ai]];
            }
        }
    }
}
