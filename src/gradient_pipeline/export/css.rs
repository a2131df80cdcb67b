use crate::gradient_pipeline::export::preset::{PresetRecord, format_num};

fn rgba(c: &[u8; 4]) -> String {
    format!("rgba({}, {}, {}, {:.3})", c[0], c[1], c[2], f64::from(c[3]) / 255.0)
}

/// CSS `linear-gradient` for a preset; angles use the screen convention
/// (0 along +x, 90 along +y down) that the fit uses.
pub fn make_gradient_css(preset: &PresetRecord) -> String {
    format!(
        "linear-gradient({}deg, {} 0%, {} 100%)",
        format_num(preset.angle_deg, 4),
        rgba(&preset.color_start),
        rgba(&preset.color_end)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_string() {
        let preset = PresetRecord {
            id: "sky".to_string(),
            width: 4,
            height: 4,
            angle_deg: 12.25,
            color_start: [10, 20, 30, 255],
            color_end: [40, 50, 60, 0],
            rmse: 0.0,
        };
        assert_eq!(
            make_gradient_css(&preset),
            "linear-gradient(12.25deg, rgba(10, 20, 30, 1.000) 0%, rgba(40, 50, 60, 0.000) 100%)"
        );
    }
}
