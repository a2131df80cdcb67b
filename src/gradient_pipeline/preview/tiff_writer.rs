use std::io::Write;
use tracing::debug;
use crate::gradient_pipeline::common::error::{Result, PipelineError};
use crate::gradient_pipeline::preview::types::PreviewCompression;
use crate::gradient_pipeline::preview::writer::PreviewWriter;
use crate::gradient_pipeline::texture::types::TextureImage;

/// Encodes RGBA8 images as single-page TIFF files.
pub struct StandardPreviewWriter;

impl PreviewWriter for StandardPreviewWriter {
    fn write_preview(&self, image: &TextureImage, output: &mut dyn Write, compression: PreviewCompression) -> Result<()> {
        debug!("Encoding preview TIFF: {}x{} ({:?})", image.width, image.height, compression);

        if image.width == 0 || image.height == 0 {
            return Err(PipelineError::InvalidDimensions(image.width, image.height));
        }

        let mut buffer = Vec::new();
        {
            let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| PipelineError::EncodeError(e.to_string()))?
                .with_compression(compression.to_tiff());

            encoder.write_image::<tiff::encoder::colortype::RGBA8>(
                image.width as u32,
                image.height as u32,
                &image.pixels,
            ).map_err(|e| PipelineError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("Preview encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
