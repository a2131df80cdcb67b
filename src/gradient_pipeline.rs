//! Gradient reconstruction pipeline module
//!
//! This module provides a structured approach to recovering linear gradients
//! from textures, with separate modules for texture decoding, fitting,
//! preview writing, export, and orchestration.

pub mod common;
pub mod texture;
pub mod fit;
pub mod preview;
pub mod export;
pub mod conversions;

pub use common::{
    FormatError,
    PipelineError,
    Result,
};

pub use texture::{
    AutoTextureReader,
    DdsHeader,
    DdsReader,
    TextureImage,
    TextureReader,
    TiffTextureReader,
};

pub use fit::{
    AnalysisConfig,
    AnalysisConfigBuilder,
    AnalysisResult,
    GradientModel,
    analyze,
    rebuild_gradient,
};

pub use preview::{
    PreviewCompression,
    PreviewWriter,
    StandardPreviewWriter,
};

pub use export::{
    PresetRecord,
    generate_gradient_json,
    generate_gradient_module,
    make_gradient_css,
};

pub use conversions::{
    BatchFailure,
    BatchReport,
    GradientAnalysisPipeline,
};
