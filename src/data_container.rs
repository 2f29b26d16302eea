//! Data containers passed through the filtering pipeline.

use ndarray::{Array2, Array3, Axis};

/// A stack of 2D image planes together with the filter products derived from
/// them.
///
/// The stack is laid out `(planes, rows, cols)`; a plain 2D image is a stack
/// with a single plane. Every filter invocation produces a fresh `ImageStack`,
/// the input `data` is never mutated in place.
///
/// # Fields
/// - `data`: The input image planes.
/// - `filtered`: The filtered planes, same shape as `data`.
/// - `mask`: The frequency-domain selection mask, shaped `(rows, cols)`. Also
///   kept for visualization by the host, not only as an intermediate.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageStack {
    pub data: Array3<f32>,
    pub filtered: Array3<f32>,
    pub mask: Array2<f32>,
}

impl Default for ImageStack {
    fn default() -> Self {
        ImageStack {
            data: Array3::zeros((0, 0, 0)),
            filtered: Array3::zeros((0, 0, 0)),
            mask: Array2::zeros((0, 0)),
        }
    }
}

impl ImageStack {
    /// Wraps a stack of image planes, with empty filter products.
    pub fn from_planes(data: Array3<f32>) -> Self {
        let dim = data.dim();
        ImageStack {
            data,
            filtered: Array3::zeros(dim),
            mask: Array2::zeros((dim.1, dim.2)),
        }
    }

    /// Wraps a single 2D image as a one-plane stack.
    pub fn from_image(image: Array2<f32>) -> Self {
        Self::from_planes(image.insert_axis(Axis(0)))
    }

    /// Shape `(rows, cols)` of the individual planes.
    pub fn plane_shape(&self) -> (usize, usize) {
        let (_, rows, cols) = self.data.dim();
        (rows, cols)
    }

    /// True when there is no pixel data to operate on.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
