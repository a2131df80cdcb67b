//! Per-channel least squares along a candidate direction.
//!
//! For `t = x * dx + y * dy` each channel is fitted as `c = slope * t + intercept`.
//! When `n * sum(t^2) - sum(t)^2` is below `DEGENERATE_DENOMINATOR` the fit
//! falls back to the channel mean with zero slope.

use crate::gradient_pipeline::fit::types::{ChannelLinearModel, Sample};

pub const DEGENERATE_DENOMINATOR: f64 = 1e-8;

#[derive(Debug, Clone, Copy, Default)]
struct Sums {
    n: f64,
    t: f64,
    tt: f64,
    c: f64,
    tc: f64,
}

impl Sums {
    fn solve(&self) -> ChannelLinearModel {
        let denom = self.n * self.tt - self.t * self.t;
        if denom.abs() < DEGENERATE_DENOMINATOR {
            return ChannelLinearModel {
                slope: 0.0,
                intercept: if self.n > 0.0 { self.c / self.n } else { 0.0 },
            };
        }
        let slope = (self.n * self.tc - self.t * self.c) / denom;
        let intercept = (self.c - slope * self.t) / self.n;
        ChannelLinearModel { slope, intercept }
    }
}

/// Projection of a sample onto `(dx, dy)`.
#[inline]
pub fn project(sample: &Sample, dx: f64, dy: f64) -> f64 {
    sample.x * dx + sample.y * dy
}

/// Fits one channel (0..=3) against the projection onto `(dx, dy)`.
pub fn fit_channel(samples: &[Sample], channel: usize, dx: f64, dy: f64) -> ChannelLinearModel {
    let mut sums = Sums::default();
    for s in samples {
        let t = project(s, dx, dy);
        let c = s.rgba[channel];
        sums.n += 1.0;
        sums.t += t;
        sums.tt += t * t;
        sums.c += c;
        sums.tc += t * c;
    }
    sums.solve()
}

/// Fits all four channels in a single pass; identical to four `fit_channel` calls.
pub fn fit_all_channels(samples: &[Sample], dx: f64, dy: f64) -> [ChannelLinearModel; 4] {
    let mut sums = [Sums::default(); 4];
    for s in samples {
        let t = project(s, dx, dy);
        for (channel, acc) in sums.iter_mut().enumerate() {
            let c = s.rgba[channel];
            acc.n += 1.0;
            acc.t += t;
            acc.tt += t * t;
            acc.c += c;
            acc.tc += t * c;
        }
    }
    sums.map(|acc| acc.solve())
}

/// Total squared error of `model` over all samples and channels.
pub fn total_squared_error(
    samples: &[Sample],
    model: &[ChannelLinearModel; 4],
    dx: f64,
    dy: f64,
) -> f64 {
    let mut error = 0.0;
    for s in samples {
        let t = project(s, dx, dy);
        for (channel, line) in model.iter().enumerate() {
            let d = line.predict(t) - s.rgba[channel];
            error += d * d;
        }
    }
    error
}
