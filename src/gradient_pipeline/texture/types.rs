//! Texture image data types

/// Decoded texture, always RGBA8, row-major, no row padding.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    /// Source name (usually the file name)
    pub name: String,
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Source encoding, e.g. `DXT5`, `RGB32` or `TIFF-RGBA8`
    pub format: String,
    /// Interleaved RGBA pixel data, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// RGBA value at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let o = (y * self.width + x) * 4;
        [
            self.pixels[o],
            self.pixels[o + 1],
            self.pixels[o + 2],
            self.pixels[o + 3],
        ]
    }
}

/// Pixel-format mask set used by uncompressed surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelMasks {
    pub r: u32,
    pub g: u32,
    pub b: u32,
    pub a: u32,
}

/// Fields of the 128-byte DDS header that the decoder needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsHeader {
    pub width: u32,
    pub height: u32,
    /// Pixel-format flags (offset 80)
    pub pf_flags: u32,
    /// Raw FourCC value (offset 84), little-endian packed ASCII
    pub four_cc: u32,
    /// Bits per pixel for uncompressed surfaces (offset 88)
    pub rgb_bit_count: u32,
    pub masks: ChannelMasks,
}

impl DdsHeader {
    pub fn has_four_cc(&self) -> bool {
        self.pf_flags & super::dds_reader::DDPF_FOURCC != 0
    }

    /// FourCC rendered as its four ASCII characters.
    pub fn four_cc_string(&self) -> String {
        self.four_cc
            .to_le_bytes()
            .iter()
            .map(|&b| b as char)
            .collect()
    }
}
