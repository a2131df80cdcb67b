//! Texture reading module
//!
//! Decodes DDS surfaces (and 8-bit TIFF images) into RGBA8 images.

mod reader;
mod auto_reader;
pub mod block;
pub mod dds_reader;
pub mod tiff_reader;
pub mod types;
pub mod uncompressed;

pub use reader::TextureReader;
pub use auto_reader::AutoTextureReader;
pub use dds_reader::{DdsReader, parse_dds, parse_header};
pub use tiff_reader::TiffTextureReader;
pub use types::{ChannelMasks, DdsHeader, TextureImage};
