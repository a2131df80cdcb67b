use crate::gradient_pipeline::fit::types::Sample;
use crate::gradient_pipeline::texture::TextureImage;

/// Divisor that maps pixel indices `0..len` onto `[0, 1]`; 1 for single-pixel axes.
#[inline]
pub fn axis_divisor(len: usize) -> f64 {
    len.saturating_sub(1).max(1) as f64
}

/// Flattens an image into normalized samples, rows top to bottom.
pub fn collect_samples(image: &TextureImage) -> Vec<Sample> {
    let max_x = axis_divisor(image.width);
    let max_y = axis_divisor(image.height);

    let mut samples = Vec::with_capacity(image.width * image.height);
    for (row, line) in image
        .pixels
        .chunks_exact(image.width.max(1) * 4)
        .take(image.height)
        .enumerate()
    {
        for (col, px) in line.chunks_exact(4).enumerate() {
            samples.push(Sample {
                x: col as f64 / max_x,
                y: row as f64 / max_y,
                rgba: [
                    f64::from(px[0]),
                    f64::from(px[1]),
                    f64::from(px[2]),
                    f64::from(px[3]),
                ],
            });
        }
    }
    samples
}
