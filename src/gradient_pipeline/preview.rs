//! Preview writing module
//!
//! Writes rebuilt gradients as TIFF images for side-by-side comparison with the source.

mod writer;
mod tiff_writer;
pub mod types;

pub use writer::PreviewWriter;
pub use tiff_writer::StandardPreviewWriter;
pub use types::PreviewCompression;
