use thiserror::Error;

/// Reasons a texture buffer cannot be turned into an RGBA8 image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("DDS file too small: {0} bytes (header needs 128)")]
    TooSmall(usize),

    #[error("Not a DDS file (magic mismatch: {0:#010x})")]
    BadMagic(u32),

    #[error("Invalid DDS dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unsupported DDS FourCC: {0}")]
    UnsupportedFourCc(String),

    #[error("Unsupported uncompressed pixel size: {bit_count} bits")]
    UnsupportedPixelSize { bit_count: u32 },

    #[error("Surface {width}x{height} is too large to decode")]
    SurfaceTooLarge { width: usize, height: usize },

    #[error("Pixel data truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("Unsupported TIFF layout: {0}")]
    UnsupportedTiff(String),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Failed to decode texture: {0}")]
    DecodeError(String),

    #[error("Failed to encode preview: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
