//! Gradient fitting types and configuration

use serde::{Deserialize, Serialize};

use crate::gradient_pipeline::preview::PreviewCompression;

/// Default number of candidate directions over the half-turn.
pub const DEFAULT_ANGLE_STEPS: usize = 720;
/// Smallest accepted number of candidate directions.
pub const MIN_ANGLE_STEPS: usize = 90;
/// Largest accepted number of candidate directions.
pub const MAX_ANGLE_STEPS: usize = 2160;

/// Clamps a requested step count into `[MIN_ANGLE_STEPS, MAX_ANGLE_STEPS]`.
pub fn clamp_angle_steps(requested: usize) -> usize {
    requested.clamp(MIN_ANGLE_STEPS, MAX_ANGLE_STEPS)
}

/// One normalized pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Column normalized to [0, 1]
    pub x: f64,
    /// Row normalized to [0, 1]
    pub y: f64,
    pub rgba: [f64; 4],
}

/// `predicted = slope * t + intercept` for one color channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelLinearModel {
    pub slope: f64,
    pub intercept: f64,
}

impl ChannelLinearModel {
    #[inline]
    pub fn predict(&self, t: f64) -> f64 {
        self.slope * t + self.intercept
    }
}

/// A solved two-color linear gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientModel {
    /// Direction angle in degrees, `[0, 360)`, 0 along +x and 90 along +y (down)
    pub angle_deg: f64,
    /// Unit direction vector
    pub direction: [f64; 2],
    /// Smallest projection of the unit-square corners onto `direction`
    pub t_min: f64,
    /// Largest projection of the unit-square corners onto `direction`
    pub t_max: f64,
    /// `max(t_max - t_min, 1e-6)`
    pub t_span: f64,
    pub color_start: [u8; 4],
    pub color_end: [u8; 4],
}

/// Outcome of analyzing one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub format: String,
    pub model: GradientModel,
    /// Total squared error over all samples and channels, divided by `samples * 4`
    pub mse: f64,
    pub rmse: f64,
    /// Candidate directions evaluated after clamping
    pub angle_steps: usize,
}

fn format_rgba(label: &str, rgba: &[u8; 4]) -> String {
    format!(
        "{}: [{}, {}, {}, {}]",
        label, rgba[0], rgba[1], rgba[2], rgba[3]
    )
}

impl AnalysisResult {
    /// Human-readable report of the solved gradient.
    pub fn summary(&self) -> String {
        [
            format!("File: {}", self.name),
            format!("Format: {}", self.format),
            format!("Size: {}x{}", self.width, self.height),
            format!("Best direction angle (deg): {:.4}", self.model.angle_deg),
            format!(
                "Direction vector: [{:.6}, {:.6}]",
                self.model.direction[0], self.model.direction[1]
            ),
            format_rgba("Start color", &self.model.color_start),
            format_rgba("End color", &self.model.color_end),
            format!("RMSE: {:.5} (lower is better)", self.rmse),
        ]
        .join("\n")
    }
}

/// Configuration for gradient analysis
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Requested candidate directions; clamped into [90, 2160] when the search runs
    pub angle_steps: usize,
    /// Evaluate candidate angles (and batch files) on the rayon pool
    pub parallel: bool,
    /// Whether to validate image dimensions before analysis
    pub validate_dimensions: bool,
    /// Reject images whose width or height exceeds this
    pub max_dimension: Option<usize>,
    /// Compression used for rebuilt preview TIFFs
    pub preview_compression: PreviewCompression,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            angle_steps: DEFAULT_ANGLE_STEPS,
            parallel: true,
            validate_dimensions: true,
            max_dimension: Some(16384),
            preview_compression: PreviewCompression::None,
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Step count the search will actually use.
    pub fn effective_angle_steps(&self) -> usize {
        clamp_angle_steps(self.angle_steps)
    }
}

/// Builder for AnalysisConfig
#[derive(Default)]
pub struct AnalysisConfigBuilder {
    angle_steps: Option<usize>,
    parallel: Option<bool>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    preview_compression: Option<PreviewCompression>,
}

impl AnalysisConfigBuilder {
    pub fn angle_steps(mut self, steps: usize) -> Self {
        self.angle_steps = Some(steps);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn preview_compression(mut self, compression: PreviewCompression) -> Self {
        self.preview_compression = Some(compression);
        self
    }

    pub fn build(self) -> AnalysisConfig {
        let default = AnalysisConfig::default();
        AnalysisConfig {
            angle_steps: self.angle_steps.unwrap_or(default.angle_steps),
            parallel: self.parallel.unwrap_or(default.parallel),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            preview_compression: self.preview_compression.unwrap_or(default.preview_compression),
        }
    }
}
