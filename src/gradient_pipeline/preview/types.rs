//! Preview encoding types

/// TIFF compression methods for preview images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

impl PreviewCompression {
    pub fn to_tiff(self) -> tiff::encoder::Compression {
        use tiff::encoder::Compression;
        use tiff::encoder::compression::DeflateLevel;

        match self {
            PreviewCompression::None => Compression::Uncompressed,
            PreviewCompression::Lzw => Compression::Lzw,
            PreviewCompression::DeflateFast => Compression::Deflate(DeflateLevel::Fast),
            PreviewCompression::DeflateBalanced => Compression::Deflate(DeflateLevel::Balanced),
            PreviewCompression::DeflateBest => Compression::Deflate(DeflateLevel::Best),
        }
    }
}

impl std::str::FromStr for PreviewCompression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(PreviewCompression::None),
            "lzw" => Ok(PreviewCompression::Lzw),
            "deflate-fast" => Ok(PreviewCompression::DeflateFast),
            "deflate" | "deflate-balanced" => Ok(PreviewCompression::DeflateBalanced),
            "deflate-best" => Ok(PreviewCompression::DeflateBest),
            other => Err(format!("unknown preview compression: {other}")),
        }
    }
}
