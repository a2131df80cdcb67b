//! Pipeline conversions module
//!
//! This module contains orchestration logic: texture bytes in, solved gradients
//! (and optional rebuilt previews) out.

mod analysis;
mod timing;


pub use analysis::{BatchFailure, BatchReport, GradientAnalysisPipeline};
pub use timing::{PipelineTimings, StepTiming};
