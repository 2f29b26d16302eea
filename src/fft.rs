//! Complex 2D FFT wrappers around rustfft.
//!
//! Conventions match numpy: the forward transform is unnormalized and the
//! inverse transform is normalized by `1 / (rows * cols)`. The zero-frequency
//! component sits at index (0, 0).

use ndarray::{Array2, ArrayView2};
use num_complex::Complex32;
use rustfft::FftPlanner;

/// Forward 2D FFT of a real-valued image.
///
/// The transform runs along each row first and then along each column via a
/// transposed pass, so both passes operate on contiguous memory.
pub fn fft2(input: ArrayView2<f32>) -> Array2<Complex32> {
    let (rows, cols) = input.dim();
    if rows == 0 || cols == 0 {
        return Array2::zeros((rows, cols));
    }
    let mut planner = FftPlanner::new();

    let mut spectrum = input.mapv(|v| Complex32::new(v, 0.0));
    let row_fft = planner.plan_fft_forward(cols);
    for mut row in spectrum.rows_mut() {
        row_fft.process(row.as_slice_mut().expect("rows are contiguous"));
    }

    let col_fft = planner.plan_fft_forward(rows);
    let mut spectrum = transposed(&spectrum);
    for mut col in spectrum.rows_mut() {
        col_fft.process(col.as_slice_mut().expect("rows are contiguous"));
    }
    transposed(&spectrum)
}

/// Inverse 2D FFT, normalized by `1 / (rows * cols)`.
///
/// The result stays complex; callers that fed a real image through a real
/// mask take the real component and discard the numerical residue in the
/// imaginary part.
pub fn ifft2(input: &Array2<Complex32>) -> Array2<Complex32> {
    let (rows, cols) = input.dim();
    if rows == 0 || cols == 0 {
        return Array2::zeros((rows, cols));
    }
    let mut planner = FftPlanner::new();

    let mut image = input.clone();
    let row_ifft = planner.plan_fft_inverse(cols);
    for mut row in image.rows_mut() {
        row_ifft.process(row.as_slice_mut().expect("rows are contiguous"));
    }

    let col_ifft = planner.plan_fft_inverse(rows);
    let mut image = transposed(&image);
    for mut col in image.rows_mut() {
        col_ifft.process(col.as_slice_mut().expect("rows are contiguous"));
    }

    let norm = 1.0 / (rows * cols) as f32;
    let mut image = transposed(&image);
    image.mapv_inplace(|v| v * norm);
    image
}

/// Returns a standard-layout transposed copy.
fn transposed(a: &Array2<Complex32>) -> Array2<Complex32> {
    let (rows, cols) = a.dim();
    Array2::from_shape_fn((cols, rows), |(i, j)| a[[j, i]])
}
