//! Exhaustive direction search.
//!
//! Candidate angles `i / steps * PI` for `i in 0..steps` cover a half-turn: a
//! direction and its opposite with swapped endpoints describe the same
//! gradient. Every candidate gets a closed-form per-channel fit; the minimum
//! total squared error wins, lowest index first on ties.

use std::cmp::Ordering;
use std::f64::consts::PI;

use rayon::prelude::*;
use tracing::debug;

use crate::gradient_pipeline::common::clamp_byte;
use crate::gradient_pipeline::fit::regression::{fit_all_channels, total_squared_error};
use crate::gradient_pipeline::fit::samples::collect_samples;
use crate::gradient_pipeline::fit::types::{
    AnalysisConfig, AnalysisResult, ChannelLinearModel, GradientModel, Sample, clamp_angle_steps,
};
use crate::gradient_pipeline::texture::TextureImage;

/// Lower bound for `t_max - t_min`.
pub const MIN_T_SPAN: f64 = 1e-6;

const UNIT_SQUARE_CORNERS: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)];

/// Fit of every channel along one candidate direction.
#[derive(Debug, Clone, Copy)]
pub struct DirectionFit {
    pub index: usize,
    /// Radians in `[0, PI)`
    pub angle: f64,
    pub dx: f64,
    pub dy: f64,
    pub channels: [ChannelLinearModel; 4],
    pub error: f64,
}

impl DirectionFit {
    fn unset() -> Self {
        Self {
            index: usize::MAX,
            angle: 0.0,
            dx: 1.0,
            dy: 0.0,
            channels: [ChannelLinearModel::default(); 4],
            error: f64::INFINITY,
        }
    }

    fn order(&self, other: &Self) -> Ordering {
        self.error
            .total_cmp(&other.error)
            .then(self.index.cmp(&other.index))
    }
}

fn better(a: DirectionFit, b: DirectionFit) -> DirectionFit {
    if b.order(&a) == Ordering::Less { b } else { a }
}

/// Fits candidate `index` of `steps`.
pub fn fit_direction(samples: &[Sample], index: usize, steps: usize) -> DirectionFit {
    let angle = (index as f64 / steps as f64) * PI;
    let dx = angle.cos();
    let dy = angle.sin();
    let channels = fit_all_channels(samples, dx, dy);
    let error = total_squared_error(samples, &channels, dx, dy);
    DirectionFit {
        index,
        angle,
        dx,
        dy,
        channels,
        error,
    }
}

/// Sweeps `steps` candidates and returns the best one.
pub fn search_direction(samples: &[Sample], steps: usize, parallel: bool) -> DirectionFit {
    if parallel {
        (0..steps)
            .into_par_iter()
            .map(|i| fit_direction(samples, i, steps))
            .reduce(DirectionFit::unset, better)
    } else {
        (0..steps)
            .map(|i| fit_direction(samples, i, steps))
            .fold(DirectionFit::unset(), better)
    }
}

/// Range of the unit-square corners projected onto `(dx, dy)`.
pub fn projected_range(dx: f64, dy: f64) -> (f64, f64) {
    UNIT_SQUARE_CORNERS
        .iter()
        .map(|&(x, y)| x * dx + y * dy)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
            (lo.min(t), hi.max(t))
        })
}

/// Turns the winning direction into a gradient model.
pub fn solve_model(best: &DirectionFit) -> GradientModel {
    let (t_min, t_max) = projected_range(best.dx, best.dy);
    let t_span = (t_max - t_min).max(MIN_T_SPAN);
    let color_start = best.channels.map(|line| clamp_byte(line.predict(t_min)));
    let color_end = best.channels.map(|line| clamp_byte(line.predict(t_max)));
    let angle_deg = best.angle.to_degrees().rem_euclid(360.0);

    GradientModel {
        angle_deg,
        direction: [best.dx, best.dy],
        t_min,
        t_max,
        t_span,
        color_start,
        color_end,
    }
}

/// Recovers the two-color linear gradient that best explains `image`.
///
/// `config.angle_steps` is clamped into `[90, 2160]` before the sweep.
pub fn analyze(image: &TextureImage, config: &AnalysisConfig) -> AnalysisResult {
    let angle_steps = clamp_angle_steps(config.angle_steps);
    let samples = collect_samples(image);
    let best = search_direction(&samples, angle_steps, config.parallel);
    let model = solve_model(&best);

    let mse = if samples.is_empty() {
        0.0
    } else {
        best.error / (samples.len() * 4) as f64
    };

    debug!(
        name = %image.name,
        angle_steps,
        best_index = best.index,
        angle_deg = model.angle_deg,
        mse,
        "Gradient direction solved"
    );

    AnalysisResult {
        name: image.name.clone(),
        width: image.width,
        height: image.height,
        format: image.format.clone(),
        model,
        mse,
        rmse: mse.sqrt(),
        angle_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(width: usize, height: usize, pixels: Vec<u8>) -> TextureImage {
        TextureImage {
            name: "synthetic.dds".to_string(),
            width,
            height,
            format: "RGB32".to_string(),
            pixels,
        }
    }

    fn sequential(steps: usize) -> AnalysisConfig {
        AnalysisConfig::builder().angle_steps(steps).parallel(false).build()
    }

    #[test]
    fn test_two_by_two_horizontal_gradient() {
        let black = [0u8, 0, 0, 255];
        let white = [255u8, 255, 255, 255];
        let pixels = [black, white, black, white].concat();
        let result = analyze(&texture(2, 2, pixels), &sequential(720));

        let step = 180.0 / 720.0;
        let a = result.model.angle_deg;
        assert!(a <= step || (a - 180.0).abs() <= step, "angle {a}");

        let pair = (result.model.color_start, result.model.color_end);
        assert!(pair == (black, white) || pair == (white, black), "{pair:?}");
        assert!(result.rmse < 1e-6);
    }

    #[test]
    fn test_vertical_gradient_is_ninety_degrees() {
        let mut pixels = Vec::new();
        for row in 0..4u8 {
            for _ in 0..3 {
                pixels.extend_from_slice(&[row * 80, 10, 200 - row * 60, 255]);
            }
        }
        let result = analyze(&texture(3, 4, pixels), &sequential(720));
        assert!((result.model.angle_deg - 90.0).abs() < 1e-9);
        assert_eq!(result.model.color_start, [0, 10, 200, 255]);
        assert_eq!(result.model.color_end, [240, 10, 20, 255]);
        assert!((result.model.t_min - 0.0).abs() < 1e-12);
        assert!((result.model.t_max - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_image() {
        let color = [12u8, 200, 99, 180];
        let pixels = color.repeat(5 * 3);
        let image = texture(5, 3, pixels);
        let samples = collect_samples(&image);

        for i in (0..360).step_by(17) {
            let fit = fit_direction(&samples, i, 360);
            assert!(fit.error < 1e-9, "angle index {i} error {}", fit.error);
        }

        let result = analyze(&image, &sequential(360));
        assert_eq!(result.model.color_start, color);
        assert_eq!(result.model.color_end, color);
        assert!(result.rmse < 1e-6);
    }

    #[test]
    fn test_single_pixel_image() {
        let result = analyze(&texture(1, 1, vec![9, 8, 7, 6]), &sequential(90));
        assert_eq!(result.model.color_start, [9, 8, 7, 6]);
        assert_eq!(result.model.color_end, [9, 8, 7, 6]);
        assert_eq!(result.mse, 0.0);
        assert_eq!(result.model.angle_deg, 0.0);
    }

    #[test]
    fn test_empty_image_has_zero_mse() {
        let result = analyze(&texture(0, 0, Vec::new()), &sequential(90));
        assert_eq!(result.mse, 0.0);
        assert_eq!(result.rmse, 0.0);
    }

    #[test]
    fn test_angle_steps_clamped() {
        let pixels: Vec<u8> = (0..16u8).flat_map(|i| [i * 15, 255 - i * 15, i * 7, 255]).collect();
        let image = texture(4, 4, pixels);

        let low = analyze(&image, &sequential(5));
        let floor = analyze(&image, &sequential(90));
        assert_eq!(low.angle_steps, 90);
        assert_eq!(low.model, floor.model);

        let high = analyze(&image, &sequential(99999));
        let ceiling = analyze(&image, &sequential(2160));
        assert_eq!(high.angle_steps, 2160);
        assert_eq!(high.model, ceiling.model);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pixels: Vec<u8> = (0..48u32)
            .flat_map(|i| [(i * 5) as u8, (i * 3 % 256) as u8, (200 - i * 2) as u8, 255])
            .collect();
        let image = texture(8, 6, pixels);
        let seq = analyze(&image, &sequential(720));
        let par = analyze(&image, &AnalysisConfig::builder().angle_steps(720).parallel(true).build());
        assert_eq!(seq, par);
    }

    #[test]
    fn test_projected_range_diagonal() {
        let (lo, hi) = projected_range((3.0 * PI / 4.0).cos(), (3.0 * PI / 4.0).sin());
        assert!((lo + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((hi - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        let make = |index, error| DirectionFit {
            index,
            error,
            ..DirectionFit::unset()
        };
        assert_eq!(better(make(3, 1.0), make(1, 1.0)).index, 1);
        assert_eq!(better(make(1, 1.0), make(3, 1.0)).index, 1);
        assert_eq!(better(make(1, 2.0), make(3, 1.0)).index, 3);
    }
}
