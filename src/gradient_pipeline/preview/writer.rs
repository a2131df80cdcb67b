use std::io::Write;
use crate::gradient_pipeline::common::error::Result;
use crate::gradient_pipeline::preview::types::PreviewCompression;
use crate::gradient_pipeline::texture::types::TextureImage;

pub trait PreviewWriter {
    fn write_preview(&self, image: &TextureImage, output: &mut dyn Write, compression: PreviewCompression) -> Result<()>;
}
