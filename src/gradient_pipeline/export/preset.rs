use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::gradient_pipeline::fit::AnalysisResult;

/// Exported gradient parameters for one texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetRecord {
    #[serde(skip)]
    pub id: String,
    pub width: usize,
    pub height: usize,
    pub angle_deg: f64,
    pub color_start: [u8; 4],
    pub color_end: [u8; 4],
    pub rmse: f64,
}

/// Fixed-point formatting with trailing zeros (and a bare point) removed.
pub fn format_num(v: f64, digits: usize) -> String {
    let s = format!("{:.*}", digits, v);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" { "0".to_string() } else { s }
}

fn round_to(v: f64, digits: usize) -> f64 {
    format_num(v, digits).parse().unwrap_or(v)
}

/// Source name without directory and extension.
pub fn preset_id(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string())
}

pub fn build_preset_record(analysis: &AnalysisResult) -> PresetRecord {
    PresetRecord {
        id: preset_id(&analysis.name),
        width: analysis.width,
        height: analysis.height,
        angle_deg: round_to(analysis.model.angle_deg, 4),
        color_start: analysis.model.color_start,
        color_end: analysis.model.color_end,
        rmse: round_to(analysis.rmse, 4),
    }
}
