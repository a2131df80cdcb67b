//! Gradient fitting module
//!
//! Recovers a two-color linear gradient (direction plus endpoint colors) from
//! an RGBA8 image and renders solved models back into pixels.

pub mod regression;
pub mod rebuild;
pub mod samples;
pub mod search;
pub mod types;


pub use rebuild::{rebuild_gradient, rebuild_texture};
pub use samples::collect_samples;
pub use search::{analyze, search_direction, solve_model, DirectionFit};
pub use types::{
    AnalysisConfig, AnalysisConfigBuilder, AnalysisResult, ChannelLinearModel, GradientModel,
    Sample, clamp_angle_steps, DEFAULT_ANGLE_STEPS, MAX_ANGLE_STEPS, MIN_ANGLE_STEPS,
};
