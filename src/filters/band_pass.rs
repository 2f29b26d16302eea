//! Frequency-domain bandpass filter for 2D images.
//!
//! The filter forward-transforms each image plane, multiplies the spectrum by
//! an annular selection mask and inverse-transforms the result. Only the real
//! component of the inverse transform is kept; the imaginary part is numerical
//! residue, not a meaningful channel.

use crate::data_container::ImageStack;
use crate::fft::{fft2, ifft2};
use crate::filters::filter::{Filter, FilterConfig};
use crate::mask::fourier_mask;
use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayView2, Axis, Zip};
use num_complex::Complex32;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering::Relaxed};
use std::sync::{Arc, RwLock};

/// Applies a fourier bandpass filter to a single 2D image.
///
/// The mask is built from the transform's own shape, so it always matches the
/// image exactly. Out-of-range radii degrade gracefully (empty band, fully
/// open band) rather than raising; see [`fourier_mask`] for the edge policy.
///
/// An empty image is a no-op precondition: the function returns empty arrays
/// of the same shape without touching the transform.
///
/// # Arguments
/// - `image`: Real-valued input image; never mutated.
/// - `outer_radius`: Outer band radius in pixels from the spectral origin.
/// - `inner_radius`: Inner band radius in pixels from the spectral origin.
/// - `sigma`: Optional Gaussian smoothing of the mask edges.
///
/// # Returns
/// The filtered image and the mask, both shaped like `image`.
pub fn apply_bandpass(
    image: ArrayView2<f32>,
    outer_radius: i64,
    inner_radius: i64,
    sigma: Option<f32>,
) -> (Array2<f32>, Array2<f32>) {
    let shape = image.dim();
    if image.is_empty() {
        return (Array2::zeros(shape), Array2::zeros(shape));
    }
    let spectrum = fft2(image);
    let mask = fourier_mask(spectrum.dim(), outer_radius, inner_radius, sigma);
    let filtered = filter_spectrum(spectrum, &mask);
    (filtered, mask)
}

/// Masks a spectrum and transforms it back to a real-valued image.
fn filter_spectrum(mut spectrum: Array2<Complex32>, mask: &Array2<f32>) -> Array2<f32> {
    Zip::from(&mut spectrum).and(mask).for_each(|s, &m| *s *= m);
    ifft2(&spectrum).mapv(|v| v.re)
}

/// Fourier bandpass filter over image stacks.
///
/// Parameters mirror the host's auto-generated widgets: the host mutates the
/// fields and re-runs the filter on every change. Each plane of the stack is
/// filtered independently; planes run in parallel and the abort flag cancels
/// between planes.
#[derive(Clone, Debug)]
pub struct FourierBandPass {
    /// Inner radius of the passband in pixels.
    pub inner_radius: i64,
    /// Outer radius of the passband in pixels.
    pub outer_radius: i64,
    /// Gaussian smoothing of the mask edges; `None` keeps the edges hard.
    pub sigma: Option<f32>,
}

impl Filter for FourierBandPass {
    fn new() -> Self
    where
        Self: Sized,
    {
        FourierBandPass {
            inner_radius: 0,
            outer_radius: 75,
            sigma: Some(1.0),
        }
    }

    fn reset(&mut self, _shape: &[usize]) {
        // NOOP
    }

    fn config(&self) -> FilterConfig {
        FilterConfig {
            name: "Fourier Band Pass".to_string(),
            description: "Removes spatial frequencies outside an annular band between the \
                          inner and outer radius. Soft mask edges (sigma) help avoid ringing \
                          artifacts in the result."
                .to_string(),
        }
    }

    fn filter(
        &mut self,
        input: &ImageStack,
        progress_lock: &mut Arc<RwLock<Option<f32>>>,
        abort_flag: &Arc<AtomicBool>,
    ) -> ImageStack {
        let mut output = input.clone();
        if input.is_empty() {
            log::warn!("empty image stack, skipping bandpass filter");
            return output;
        }

        if let Ok(mut p) = progress_lock.write() {
            *p = Some(0.0);
        }

        let planes = input.data.dim().0;
        // One mask per invocation; every plane shares the same shape.
        let mask = fourier_mask(
            input.plane_shape(),
            self.outer_radius,
            self.inner_radius,
            self.sigma,
        );

        let done = AtomicUsize::new(0);
        (
            input.data.axis_iter(Axis(0)),
            output.filtered.axis_iter_mut(Axis(0)),
        )
            .into_par_iter()
            .for_each(|(plane, mut filtered)| {
                if abort_flag.load(Relaxed) {
                    return;
                }
                let spectrum = fft2(plane);
                filtered.assign(&filter_spectrum(spectrum, &mask));

                let finished = done.fetch_add(1, Relaxed) + 1;
                if let Ok(mut p) = progress_lock.write() {
                    *p = Some(finished as f32 / planes as f32);
                }
            });

        output.mask = mask;

        if let Ok(mut p) = progress_lock.write() {
            *p = None;
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{s, Array2, Array3};

    fn progress() -> Arc<RwLock<Option<f32>>> {
        Arc::new(RwLock::new(None))
    }

    #[test]
    fn test_full_band_reproduces_the_image() {
        // radius 75 covers the whole 64x64 spectrum
        let image = Array2::<f32>::ones((64, 64));
        let (filtered, mask) = apply_bandpass(image.view(), 75, 0, None);

        assert!(mask.iter().all(|&v| v == 1.0));
        for (&out, &reference) in filtered.iter().zip(image.iter()) {
            assert_abs_diff_eq!(out, reference, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_zero_outer_radius_blocks_the_whole_spectrum() {
        let image = Array2::from_shape_fn((64, 64), |(i, j)| ((i + 2 * j) % 7) as f32);
        let (filtered, mask) = apply_bandpass(image.view(), 0, 0, None);

        assert!(mask.iter().all(|&v| v == 0.0));
        for &v in filtered.iter() {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_inverted_radii_close_the_band() {
        let image = Array2::from_shape_fn((64, 64), |(i, j)| (i as f32).sin() + j as f32);
        let (filtered, mask) = apply_bandpass(image.view(), 5, 10, None);

        assert!(mask.iter().all(|&v| v == 0.0));
        for &v in filtered.iter() {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_high_pass_removes_the_mean() {
        // band excluding DC turns a constant image into zeros
        let image = Array2::<f32>::from_elem((32, 32), 5.0);
        let (filtered, mask) = apply_bandpass(image.view(), 10, 2, None);

        assert_eq!(mask[[0, 0]], 0.0);
        for &v in filtered.iter() {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_output_shapes_match_input() {
        for shape in [(16, 16), (24, 17), (3, 40)] {
            let image = Array2::<f32>::ones(shape);
            let (filtered, mask) = apply_bandpass(image.view(), 6, 1, Some(1.0));
            assert_eq!(filtered.dim(), shape);
            assert_eq!(mask.dim(), shape);
        }
    }

    #[test]
    fn test_apply_bandpass_is_deterministic() {
        let image = Array2::from_shape_fn((48, 32), |(i, j)| (i as f32 * 0.3).cos() + j as f32);
        let (a, mask_a) = apply_bandpass(image.view(), 12, 3, Some(1.5));
        let (b, mask_b) = apply_bandpass(image.view(), 12, 3, Some(1.5));
        assert_eq!(a, b);
        assert_eq!(mask_a, mask_b);
    }

    #[test]
    fn test_empty_image_is_a_no_op() {
        let image = Array2::<f32>::zeros((0, 16));
        let (filtered, mask) = apply_bandpass(image.view(), 10, 0, Some(1.0));
        assert_eq!(filtered.dim(), (0, 16));
        assert_eq!(mask.dim(), (0, 16));
    }

    #[test]
    fn test_stack_filter_matches_single_plane_results() {
        let plane_a = Array2::from_shape_fn((24, 24), |(i, j)| (i * j) as f32 / 10.0);
        let plane_b = Array2::from_shape_fn((24, 24), |(i, j)| (i + j) as f32);

        let mut stack = Array3::zeros((2, 24, 24));
        stack.slice_mut(s![0, .., ..]).assign(&plane_a);
        stack.slice_mut(s![1, .., ..]).assign(&plane_b);
        let input = ImageStack::from_planes(stack);

        let mut band_pass = FourierBandPass {
            inner_radius: 2,
            outer_radius: 9,
            sigma: Some(1.0),
        };
        let mut progress = progress();
        let abort = Arc::new(AtomicBool::new(false));
        let output = band_pass.filter(&input, &mut progress, &abort);

        let (expected_a, expected_mask) = apply_bandpass(plane_a.view(), 9, 2, Some(1.0));
        let (expected_b, _) = apply_bandpass(plane_b.view(), 9, 2, Some(1.0));

        assert_eq!(output.filtered.slice(s![0, .., ..]), expected_a);
        assert_eq!(output.filtered.slice(s![1, .., ..]), expected_b);
        assert_eq!(output.mask, expected_mask);
        // the input stack is left untouched
        assert_eq!(input.data, output.data);
        assert!(progress.read().unwrap().is_none());
    }

    #[test]
    fn test_empty_stack_is_skipped() {
        let input = ImageStack::default();
        let mut band_pass = FourierBandPass::new();
        let mut progress = progress();
        let abort = Arc::new(AtomicBool::new(false));
        let output = band_pass.filter(&input, &mut progress, &abort);
        assert!(output.is_empty());
    }

    #[test]
    fn test_abort_flag_skips_planes() {
        let input = ImageStack::from_planes(Array3::ones((4, 16, 16)));
        let mut band_pass = FourierBandPass::new();
        let mut progress = progress();
        let abort = Arc::new(AtomicBool::new(true));
        let output = band_pass.filter(&input, &mut progress, &abort);
        // aborted before any plane was processed
        assert!(output.filtered.iter().all(|&v| v == 0.0));
    }
}
