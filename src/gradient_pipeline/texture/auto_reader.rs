use crate::gradient_pipeline::common::error::Result;
use crate::gradient_pipeline::texture::dds_reader::DdsReader;
use crate::gradient_pipeline::texture::reader::TextureReader;
use crate::gradient_pipeline::texture::tiff_reader::TiffTextureReader;
use crate::gradient_pipeline::texture::types::TextureImage;

const TIFF_LE: &[u8; 4] = b"II*\0";
const TIFF_BE: &[u8; 4] = b"MM\0*";

/// Picks the TIFF reader for buffers with a TIFF byte-order mark and the
/// DDS reader for everything else.
pub struct AutoTextureReader;

pub fn is_tiff(data: &[u8]) -> bool {
    data.starts_with(TIFF_LE) || data.starts_with(TIFF_BE)
}

impl TextureReader for AutoTextureReader {
    fn read_texture(&self, data: &[u8], name: &str) -> Result<TextureImage> {
        if is_tiff(data) {
            TiffTextureReader.read_texture(data, name)
        } else {
            DdsReader.read_texture(data, name)
        }
    }

    fn read_dimensions(&self, data: &[u8]) -> Option<(usize, usize)> {
        if is_tiff(data) {
            TiffTextureReader.read_dimensions(data)
        } else {
            DdsReader.read_dimensions(data)
        }
    }
}
