//! DDS texture reader.
//!
//! Reads mip level 0 of a DirectDraw Surface. Supported surfaces are the
//! block-compressed DXT1, DXT3 and DXT5 formats and 24/32-bit uncompressed
//! surfaces described by channel bit masks.

use tracing::debug;

use crate::gradient_pipeline::common::error::{FormatError, Result};
use crate::gradient_pipeline::texture::block::{BlockFormat, decode_blocks};
use crate::gradient_pipeline::texture::reader::TextureReader;
use crate::gradient_pipeline::texture::types::{ChannelMasks, DdsHeader, TextureImage};
use crate::gradient_pipeline::texture::uncompressed::decode_uncompressed;

/// `"DDS "` read as a little-endian u32.
pub const DDS_MAGIC: u32 = 0x2053_4444;

/// Pixel-format flag: the FourCC field is valid.
pub const DDPF_FOURCC: u32 = 0x0000_0004;

/// Size of magic plus header; pixel data starts here.
pub const DDS_DATA_OFFSET: usize = 128;

pub struct DdsReader;

fn u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Parses and validates the fixed DDS header.
pub fn parse_header(data: &[u8]) -> std::result::Result<DdsHeader, FormatError> {
    if data.len() < DDS_DATA_OFFSET {
        return Err(FormatError::TooSmall(data.len()));
    }

    let magic = u32_at(data, 0);
    if magic != DDS_MAGIC {
        return Err(FormatError::BadMagic(magic));
    }

    let header = DdsHeader {
        height: u32_at(data, 12),
        width: u32_at(data, 16),
        pf_flags: u32_at(data, 80),
        four_cc: u32_at(data, 84),
        rgb_bit_count: u32_at(data, 88),
        masks: ChannelMasks {
            r: u32_at(data, 92),
            g: u32_at(data, 96),
            b: u32_at(data, 100),
            a: u32_at(data, 104),
        },
    };

    if header.width == 0 || header.height == 0 {
        return Err(FormatError::InvalidDimensions {
            width: header.width,
            height: header.height,
        });
    }

    Ok(header)
}

/// Decodes a complete DDS buffer into an RGBA8 image.
pub fn parse_dds(data: &[u8], name: &str) -> std::result::Result<TextureImage, FormatError> {
    let header = parse_header(data)?;
    let width = header.width as usize;
    let height = header.height as usize;
    let body = &data[DDS_DATA_OFFSET..];

    let (format, pixels) = if header.has_four_cc() {
        let four_cc = header.four_cc_string();
        let block_format = match four_cc.as_str() {
            "DXT1" => BlockFormat::Dxt1,
            "DXT3" => BlockFormat::Dxt3,
            "DXT5" => BlockFormat::Dxt5,
            _ => return Err(FormatError::UnsupportedFourCc(four_cc)),
        };
        debug!("Decoding {} surface {}x{}", four_cc, width, height);
        (four_cc, decode_blocks(body, width, height, block_format)?)
    } else {
        debug!(
            "Decoding uncompressed surface {}x{}, {} bpp, masks {:?}",
            width, height, header.rgb_bit_count, header.masks
        );
        (
            format!("RGB{}", header.rgb_bit_count),
            decode_uncompressed(body, width, height, header.rgb_bit_count, header.masks)?,
        )
    };

    Ok(TextureImage {
        name: name.to_string(),
        width,
        height,
        format,
        pixels,
    })
}

impl TextureReader for DdsReader {
    fn read_texture(&self, data: &[u8], name: &str) -> Result<TextureImage> {
        debug!("Reading DDS texture {}, {} bytes", name, data.len());
        Ok(parse_dds(data, name)?)
    }

    fn read_dimensions(&self, data: &[u8]) -> Option<(usize, usize)> {
        parse_header(data)
            .ok()
            .map(|h| (h.width as usize, h.height as usize))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a 128-byte header followed by `body`.
    pub(crate) fn dds_bytes(
        width: u32,
        height: u32,
        four_cc: Option<&[u8; 4]>,
        rgb_bit_count: u32,
        masks: ChannelMasks,
        body: &[u8],
    ) -> Vec<u8> {
        let mut data = vec![0u8; DDS_DATA_OFFSET];
        let mut put = |offset: usize, v: u32| {
            data[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
        };
        put(0, DDS_MAGIC);
        put(4, 124);
        put(12, height);
        put(16, width);
        put(76, 32);
        match four_cc {
            Some(cc) => {
                put(80, DDPF_FOURCC);
                put(84, u32::from_le_bytes(*cc));
            }
            None => {
                put(80, 0x41);
                put(88, rgb_bit_count);
                put(92, masks.r);
                put(96, masks.g);
                put(100, masks.b);
                put(104, masks.a);
            }
        }
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn test_too_small_buffer() {
        let err = parse_dds(&[0u8; 127], "short.dds").unwrap_err();
        assert_eq!(err, FormatError::TooSmall(127));
    }

    #[test]
    fn test_bad_magic() {
        let mut data = dds_bytes(4, 4, Some(b"DXT1"), 0, ChannelMasks::default(), &[0; 8]);
        data[0] = b'X';
        let err = parse_dds(&data, "bad.dds").unwrap_err();
        assert!(matches!(err, FormatError::BadMagic(_)));
        assert!(matches!(
            DdsReader.read_texture(&data, "bad.dds"),
            Err(crate::gradient_pipeline::PipelineError::Format(FormatError::BadMagic(_)))
        ));
    }

    #[test]
    fn test_zero_dimension() {
        let data = dds_bytes(0, 4, Some(b"DXT1"), 0, ChannelMasks::default(), &[]);
        let err = parse_dds(&data, "empty.dds").unwrap_err();
        assert_eq!(err, FormatError::InvalidDimensions { width: 0, height: 4 });
    }

    #[test]
    fn test_unsupported_four_cc_is_named() {
        let data = dds_bytes(4, 4, Some(b"ATI2"), 0, ChannelMasks::default(), &[0; 16]);
        let err = parse_dds(&data, "bc5.dds").unwrap_err();
        assert_eq!(err, FormatError::UnsupportedFourCc("ATI2".to_string()));
        assert!(err.to_string().contains("ATI2"));
    }

    #[test]
    fn test_oversized_block_surface_is_rejected() {
        let data = dds_bytes(u32::MAX, u32::MAX, Some(b"DXT5"), 0, ChannelMasks::default(), &[0; 16]);
        let err = parse_dds(&data, "huge.dds").unwrap_err();
        assert!(matches!(err, FormatError::SurfaceTooLarge { .. }));

        let data = dds_bytes(u32::MAX, u32::MAX, Some(b"DXT1"), 0, ChannelMasks::default(), &[0; 8]);
        let err = parse_dds(&data, "huge.dds").unwrap_err();
        assert!(matches!(err, FormatError::SurfaceTooLarge { .. }));
    }

    #[test]
    fn test_oversized_uncompressed_surface_is_rejected() {
        let masks = ChannelMasks {
            r: 0x00ff_0000,
            g: 0x0000_ff00,
            b: 0x0000_00ff,
            a: 0,
        };
        let data = dds_bytes(u32::MAX, u32::MAX, None, 24, masks, &[0; 6]);
        let err = parse_dds(&data, "huge.dds").unwrap_err();
        assert!(matches!(err, FormatError::SurfaceTooLarge { .. }));
    }

    #[test]
    fn test_large_header_with_short_body_is_truncated() {
        let data = dds_bytes(65536, 65536, Some(b"DXT1"), 0, ChannelMasks::default(), &[0; 8]);
        let err = parse_dds(&data, "big.dds").unwrap_err();
        assert_eq!(
            err,
            FormatError::Truncated {
                needed: 16384 * 16384 * 8,
                available: 8
            }
        );
    }

    #[test]
    fn test_header_fields() {
        let data = dds_bytes(8, 2, Some(b"DXT5"), 0, ChannelMasks::default(), &[]);
        let header = parse_header(&data).unwrap();
        assert_eq!((header.width, header.height), (8, 2));
        assert!(header.has_four_cc());
        assert_eq!(header.four_cc_string(), "DXT5");
    }

    #[test]
    fn test_dxt1_surface() {
        // Solid white block
        let mut block = Vec::new();
        block.extend_from_slice(&0xFFFFu16.to_le_bytes());
        block.extend_from_slice(&0x0000u16.to_le_bytes());
        block.extend_from_slice(&0u32.to_le_bytes());
        let data = dds_bytes(4, 4, Some(b"DXT1"), 0, ChannelMasks::default(), &block);

        let image = DdsReader.read_texture(&data, "white.dds").unwrap();
        assert_eq!(image.format, "DXT1");
        assert_eq!(image.name, "white.dds");
        assert_eq!(image.pixels.len(), 64);
        assert!(image.pixels.iter().all(|&b| b == 255));
    }

    #[test]
    fn test_uncompressed_surface() {
        let masks = ChannelMasks {
            r: 0x00ff_0000,
            g: 0x0000_ff00,
            b: 0x0000_00ff,
            a: 0,
        };
        let body = [0u8, 0, 255, 255, 0, 0];
        let data = dds_bytes(2, 1, None, 24, masks, &body);

        let image = parse_dds(&data, "rgb.dds").unwrap();
        assert_eq!(image.format, "RGB24");
        assert_eq!(image.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(image.pixel(1, 0), [0, 0, 255, 255]);
    }
}
