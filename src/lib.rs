pub mod gradient_pipeline;
pub mod logger;
