//! Preset export module
//!
//! Serializes solved gradients into a code module or JSON keyed by identifier.

pub mod css;
pub mod module;
pub mod preset;

pub use css::make_gradient_css;
pub use module::{generate_gradient_json, generate_gradient_module, parse_gradient_json};
pub use preset::{PresetRecord, build_preset_record, format_num, preset_id};
