//! Preset module generation.
//!
//! Entries are keyed by [`preset_id`](super::preset::preset_id) and sorted by
//! key. A later result with the same key replaces an earlier one.

use std::collections::BTreeMap;

use crate::gradient_pipeline::export::preset::{PresetRecord, build_preset_record, format_num};
use crate::gradient_pipeline::fit::AnalysisResult;

const CSS_HELPER: &str = r#"export function makeGradientCss(preset) {
  const a = preset.angleDeg;
  const s = preset.colorStart;
  const e = preset.colorEnd;
  return `linear-gradient(${a}deg, rgba(${s[0]}, ${s[1]}, ${s[2]}, ${(s[3] / 255).toFixed(3)}) 0%, rgba(${e[0]}, ${e[1]}, ${e[2]}, ${(e[3] / 255).toFixed(3)}) 100%)`;
}
"#;

fn sorted_records(analyses: &[AnalysisResult]) -> BTreeMap<String, PresetRecord> {
    analyses
        .iter()
        .map(build_preset_record)
        .map(|record| (record.id.clone(), record))
        .collect()
}

fn format_color(rgba: &[u8; 4]) -> String {
    format!("[{}, {}, {}, {}]", rgba[0], rgba[1], rgba[2], rgba[3])
}

/// ES module text: a `DDS_GRADIENT_PRESETS` table plus a CSS helper.
pub fn generate_gradient_module(analyses: &[AnalysisResult]) -> String {
    let rows: Vec<String> = sorted_records(analyses)
        .values()
        .map(|p| {
            [
                format!("  \"{}\": {{", p.id),
                format!("    width: {},", p.width),
                format!("    height: {},", p.height),
                format!("    angleDeg: {},", format_num(p.angle_deg, 4)),
                format!("    colorStart: {},", format_color(&p.color_start)),
                format!("    colorEnd: {},", format_color(&p.color_end)),
                format!("    rmse: {},", format_num(p.rmse, 4)),
                "  },".to_string(),
            ]
            .join("\n")
        })
        .collect();

    format!(
        "export const DDS_GRADIENT_PRESETS = {{\n{}\n}};\n\n{}",
        rows.join("\n"),
        CSS_HELPER
    )
}

/// Pretty-printed JSON object keyed by preset id.
pub fn generate_gradient_json(analyses: &[AnalysisResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&sorted_records(analyses))
}

/// Parses JSON written by [`generate_gradient_json`], ids restored from the keys.
pub fn parse_gradient_json(text: &str) -> serde_json::Result<Vec<PresetRecord>> {
    let map: BTreeMap<String, PresetRecord> = serde_json::from_str(text)?;
    Ok(map
        .into_iter()
        .map(|(id, record)| PresetRecord { id, ..record })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient_pipeline::fit::GradientModel;

    fn result(name: &str, angle_deg: f64, rmse: f64) -> AnalysisResult {
        AnalysisResult {
            name: name.to_string(),
            width: 16,
            height: 8,
            format: "DXT1".to_string(),
            model: GradientModel {
                angle_deg,
                direction: [angle_deg.to_radians().cos(), angle_deg.to_radians().sin()],
                t_min: 0.0,
                t_max: 1.0,
                t_span: 1.0,
                color_start: [1, 2, 3, 255],
                color_end: [200, 150, 100, 255],
            },
            mse: rmse * rmse,
            rmse,
            angle_steps: 720,
        }
    }

    #[test]
    fn test_module_sorted_and_formatted() {
        let text = generate_gradient_module(&[
            result("night_02.dds", 90.0, 0.5),
            result("day_01.dds", 12.345678, 1.23456),
        ]);

        let day = text.find("\"day_01\"").unwrap();
        let night = text.find("\"night_02\"").unwrap();
        assert!(day < night);
        assert!(text.starts_with("export const DDS_GRADIENT_PRESETS = {\n  \"day_01\": {\n"));
        assert!(text.contains("    angleDeg: 12.3457,\n"));
        assert!(text.contains("    angleDeg: 90,\n"));
        assert!(text.contains("    colorStart: [1, 2, 3, 255],\n"));
        assert!(text.contains("    rmse: 1.2346,\n"));
        assert!(text.contains("export function makeGradientCss(preset)"));
    }

    #[test]
    fn test_empty_module() {
        let text = generate_gradient_module(&[]);
        assert!(text.starts_with("export const DDS_GRADIENT_PRESETS = {\n\n};\n"));
    }

    #[test]
    fn test_json_round_trip() {
        let analyses = [result("b.dds", 45.0, 0.25), result("a.dds", 135.5, 0.0)];
        let json = generate_gradient_json(&analyses).unwrap();
        assert!(json.contains("\"angleDeg\": 135.5"));
        assert!(!json.contains("\"id\""));

        let records = parse_gradient_json(&json).unwrap();
        let expected: Vec<PresetRecord> = sorted_records(&analyses).into_values().collect();
        assert_eq!(records, expected);
        assert_eq!(records[0].id, "a");
    }
}
