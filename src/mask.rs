//! Construction of frequency-domain bandpass masks.
//!
//! A bandpass mask is an annular selection in the 2D spatial-frequency plane:
//! pixels between the inner and outer radius carry weight 1.0, everything else
//! 0.0. The annulus is drawn around the geometric image center for readability
//! and then rolled so the zero-frequency component sits at index (0, 0), the
//! corner-origin convention of the FFT. Optional Gaussian smoothing tapers the
//! band edges to suppress ringing artifacts in the filtered image.

use ndarray::{Array1, Array2};

/// Creates a fourier bandpass mask for an image of the given shape.
///
/// The mask is built in two phases: the annulus is rasterized around the
/// fractional image center `(rows / 2, cols / 2)`, then cyclically rolled by
/// the integer-truncated half-shape along both axes. Drawing directly in
/// corner-origin coordinates is prone to off-by-one wraparound errors at odd
/// dimensions, so the two-phase construction is deliberate.
///
/// The outer disk is drawn first and the inner disk carved out second, so the
/// inner disk always wins: `inner_radius >= outer_radius` yields an all-zero
/// mask (a closed band) rather than an error. Negative radii rasterize as
/// empty disks and radii larger than the array are clipped to its bounds.
///
/// # Arguments
/// - `shape`: Shape `(rows, cols)` of the image the mask will be applied to.
/// - `outer_radius`: Outer radius of the band in pixels.
/// - `inner_radius`: Inner radius of the band in pixels.
/// - `sigma`: Optional standard deviation for Gaussian edge smoothing.
///   `None` or a non-positive value returns the hard-edged mask unchanged.
///
/// # Returns
/// A mask of exactly `shape` with weights in [0, 1]; without smoothing the
/// weights are exactly 0.0 or 1.0.
pub fn fourier_mask(
    shape: (usize, usize),
    outer_radius: i64,
    inner_radius: i64,
    sigma: Option<f32>,
) -> Array2<f32> {
    let (rows, cols) = shape;
    let mut mask = Array2::<f32>::zeros(shape);
    if rows == 0 || cols == 0 {
        return mask;
    }

    let center = (rows as f32 / 2.0, cols as f32 / 2.0);
    fill_disk(&mut mask, center, outer_radius as f32, 1.0);
    fill_disk(&mut mask, center, inner_radius as f32, 0.0);

    // fourier space origin belongs in the corner
    let mut mask = roll2(&mask, (rows / 2, cols / 2));

    // soft edges help avoid ringing artifacts in the result
    if let Some(sigma) = sigma {
        if sigma > 0.0 {
            mask = smooth_wrap(&mask, sigma);
        }
    }
    mask
}

/// Rasterizes a filled disk into `mask`, setting covered pixels to `value`.
///
/// Membership is strict (`distance^2 < radius^2`), so a radius of zero or less
/// covers no pixels. Pixels outside the array bounds are silently dropped.
fn fill_disk(mask: &mut Array2<f32>, center: (f32, f32), radius: f32, value: f32) {
    if radius <= 0.0 {
        return;
    }
    let (rows, cols) = mask.dim();
    let (cr, cc) = center;
    let radius_sq = radius * radius;

    let row_lo = (cr - radius).floor().max(0.0) as usize;
    let row_hi = ((cr + radius).ceil() as usize).min(rows.saturating_sub(1));
    let col_lo = (cc - radius).floor().max(0.0) as usize;
    let col_hi = ((cc + radius).ceil() as usize).min(cols.saturating_sub(1));

    for row in row_lo..=row_hi {
        for col in col_lo..=col_hi {
            let dr = row as f32 - cr;
            let dc = col as f32 - cc;
            if dr * dr + dc * dc < radius_sq {
                mask[[row, col]] = value;
            }
        }
    }
}

/// Cyclically shifts the array by `shift` pixels along each axis.
///
/// Elements pushed past the end wrap around to the start, matching the
/// behavior of `numpy.roll` with a positive shift.
fn roll2(mask: &Array2<f32>, shift: (usize, usize)) -> Array2<f32> {
    let (rows, cols) = mask.dim();
    let mut rolled = Array2::zeros((rows, cols));
    for ((row, col), &v) in mask.indexed_iter() {
        rolled[[(row + shift.0) % rows, (col + shift.1) % cols]] = v;
    }
    rolled
}

/// Smooths the mask with a separable Gaussian kernel using wrap-around
/// boundary handling.
///
/// The mask has a periodic frequency-domain meaning, so the convolution wraps
/// at the array edges instead of extending them. The kernel is normalized,
/// which keeps the smoothed weights inside [0, 1].
fn smooth_wrap(mask: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let kernel = gaussian_kernel(sigma);
    if kernel.len() <= 1 {
        return mask.clone();
    }
    let smoothed = convolve_rows_wrap(mask, &kernel);
    let smoothed = convolve_rows_wrap(&smoothed.reversed_axes(), &kernel);
    let mut smoothed = smoothed.reversed_axes().as_standard_layout().to_owned();
    // float error from the accumulation must not push weights past 1.0
    smoothed.mapv_inplace(|v| v.clamp(0.0, 1.0));
    smoothed
}

/// Builds a normalized 1D Gaussian kernel of radius `trunc(4 * sigma + 0.5)`.
fn gaussian_kernel(sigma: f32) -> Array1<f32> {
    let radius = (4.0 * sigma + 0.5) as i64;
    let mut kernel: Array1<f32> = (-radius..=radius)
        .map(|k| {
            let x = k as f32 / sigma;
            (-0.5 * x * x).exp()
        })
        .collect();
    let sum = kernel.sum();
    kernel.mapv_inplace(|w| w / sum);
    kernel
}

/// Convolves each row with `kernel`, wrapping indices at the row ends.
fn convolve_rows_wrap(mask: &Array2<f32>, kernel: &Array1<f32>) -> Array2<f32> {
    let (rows, cols) = mask.dim();
    let radius = (kernel.len() / 2) as i64;
    let mut out = Array2::zeros((rows, cols));
    for row in 0..rows {
        for col in 0..cols {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let src = (col as i64 + k as i64 - radius).rem_euclid(cols as i64) as usize;
                acc += w * mask[[row, src]];
            }
            out[[row, col]] = acc;
        }
    }
    out
}
