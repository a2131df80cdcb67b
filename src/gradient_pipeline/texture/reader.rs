use crate::gradient_pipeline::common::error::Result;
use crate::gradient_pipeline::texture::types::TextureImage;

pub trait TextureReader {
    fn read_texture(&self, data: &[u8], name: &str) -> Result<TextureImage>;

    /// Declared `(width, height)` read from the header alone, without decoding
    /// pixels. `None` when the reader cannot tell cheaply; a malformed header
    /// is left for `read_texture` to report.
    fn read_dimensions(&self, _data: &[u8]) -> Option<(usize, usize)> {
        None
    }
}
