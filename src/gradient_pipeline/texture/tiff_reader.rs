//! TIFF texture reader.
//!
//! Loads 8-bit TIFF images through the `tiff` crate and widens them to RGBA8
//! so they can be analyzed exactly like decoded DDS surfaces. Previews
//! written by [`StandardPreviewWriter`](crate::gradient_pipeline::StandardPreviewWriter)
//! read back through this reader.

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::gradient_pipeline::common::error::{FormatError, PipelineError, Result};
use crate::gradient_pipeline::common::surface_len;
use crate::gradient_pipeline::texture::reader::TextureReader;
use crate::gradient_pipeline::texture::types::TextureImage;

pub struct TiffTextureReader;

impl TextureReader for TiffTextureReader {
    fn read_texture(&self, data: &[u8], name: &str) -> Result<TextureImage> {
        debug!("Decoding TIFF texture {}, {} bytes", name, data.len());

        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;
        let (width, height) = decoder
            .dimensions()
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;
        let color_type = decoder
            .colortype()
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        let channels = match color_type {
            ColorType::Gray(8) => 1,
            ColorType::GrayA(8) => 2,
            ColorType::RGB(8) => 3,
            ColorType::RGBA(8) => 4,
            other => {
                return Err(FormatError::UnsupportedTiff(format!("{:?}", other)).into());
            }
        };

        let samples = match decoder
            .read_image()
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?
        {
            DecodingResult::U8(values) => values,
            _ => return Err(FormatError::UnsupportedTiff("non-u8 samples".to_string()).into()),
        };

        let (width, height) = (width as usize, height as usize);
        let needed = surface_len(width, height, channels)?;
        if samples.len() < needed {
            return Err(FormatError::Truncated {
                needed,
                available: samples.len(),
            }
            .into());
        }

        let pixels = widen_to_rgba(&samples[..needed], channels);
        debug!("Decoded TIFF {}x{}, {} channel(s)", width, height, channels);

        Ok(TextureImage {
            name: name.to_string(),
            width,
            height,
            format: format!("TIFF-{}", tiff_format_name(channels)),
            pixels,
        })
    }

    fn read_dimensions(&self, data: &[u8]) -> Option<(usize, usize)> {
        let mut decoder = Decoder::new(Cursor::new(data)).ok()?;
        let (width, height) = decoder.dimensions().ok()?;
        Some((width as usize, height as usize))
    }
}

fn tiff_format_name(channels: usize) -> &'static str {
    match channels {
        1 => "GRAY8",
        2 => "GRAYA8",
        3 => "RGB8",
        _ => "RGBA8",
    }
}

fn widen_to_rgba(samples: &[u8], channels: usize) -> Vec<u8> {
    samples
        .chunks_exact(channels)
        .flat_map(|px| match channels {
            1 => [px[0], px[0], px[0], 255],
            2 => [px[0], px[0], px[0], px[1]],
            3 => [px[0], px[1], px[2], 255],
            _ => [px[0], px[1], px[2], px[3]],
        })
        .collect()
}
