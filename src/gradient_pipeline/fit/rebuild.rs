use crate::gradient_pipeline::common::clamp_byte;
use crate::gradient_pipeline::fit::samples::axis_divisor;
use crate::gradient_pipeline::fit::types::GradientModel;
use crate::gradient_pipeline::texture::TextureImage;

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Renders `model` into a `width * height` RGBA8 buffer, using the same
/// coordinate normalization as sample collection.
pub fn rebuild_gradient(width: usize, height: usize, model: &GradientModel) -> Vec<u8> {
    let max_x = axis_divisor(width);
    let max_y = axis_divisor(height);
    let [dx, dy] = model.direction;

    let mut out = vec![0u8; width * height * 4];
    for (i, px) in out.chunks_exact_mut(4).enumerate() {
        let nx = (i % width) as f64 / max_x;
        let ny = (i / width) as f64 / max_y;
        let t = nx * dx + ny * dy;
        let u = ((t - model.t_min) / model.t_span).clamp(0.0, 1.0);
        for c in 0..4 {
            px[c] = clamp_byte(lerp(
                f64::from(model.color_start[c]),
                f64::from(model.color_end[c]),
                u,
            ));
        }
    }
    out
}

/// Rebuilt gradient wrapped as a texture, ready to be analyzed again.
pub fn rebuild_texture(
    name: impl Into<String>,
    width: usize,
    height: usize,
    model: &GradientModel,
) -> TextureImage {
    TextureImage {
        name: name.into(),
        width,
        height,
        format: "REBUILT".to_string(),
        pixels: rebuild_gradient(width, height, model),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal(start: [u8; 4], end: [u8; 4]) -> GradientModel {
        GradientModel {
            angle_deg: 0.0,
            direction: [1.0, 0.0],
            t_min: 0.0,
            t_max: 1.0,
            t_span: 1.0,
            color_start: start,
            color_end: end,
        }
    }

    #[test]
    fn test_endpoints_and_midpoint() {
        let model = horizontal([0, 0, 0, 255], [200, 100, 50, 255]);
        let out = rebuild_gradient(3, 2, &model);
        assert_eq!(&out[0..4], &[0, 0, 0, 255]);
        assert_eq!(&out[4..8], &[100, 50, 25, 255]);
        assert_eq!(&out[8..12], &[200, 100, 50, 255]);
        // second row repeats the first
        assert_eq!(&out[12..24], &out[0..12]);
    }

    #[test]
    fn test_projection_is_clamped() {
        // Span narrower than the image: everything past t_max saturates
        let model = GradientModel {
            t_span: 0.5,
            t_max: 0.5,
            ..horizontal([0, 0, 0, 0], [255, 255, 255, 255])
        };
        let out = rebuild_gradient(5, 1, &model);
        assert_eq!(out[2 * 4], 255);
        assert_eq!(out[4 * 4], 255);
    }

    #[test]
    fn test_empty_dimensions() {
        let model = horizontal([1, 1, 1, 1], [2, 2, 2, 2]);
        assert!(rebuild_gradient(0, 4, &model).is_empty());
        let tex = rebuild_texture("x", 2, 2, &model);
        assert_eq!(tex.pixels.len(), 16);
        assert_eq!(tex.format, "REBUILT");
    }
}
