//! Frequency-domain bandpass filtering for 2D images.
//!
//! Given an image, the filter removes spatial frequencies outside an annular
//! band defined by an inner and outer radius, optionally smoothing the band
//! edges to suppress ringing artifacts. The crate has no display or I/O
//! surface of its own; a host application supplies the image and the three
//! numeric parameters and consumes the filtered image and the mask.
//!
//! The computational core is pure and synchronous:
//!
//! ```
//! use fourier_bandpass::apply_bandpass;
//! use ndarray::Array2;
//!
//! let image = Array2::<f32>::ones((64, 64));
//! let (filtered, mask) = apply_bandpass(image.view(), 75, 0, Some(1.0));
//! assert_eq!(filtered.dim(), image.dim());
//! assert_eq!(mask.dim(), image.dim());
//! ```
//!
//! Hosts that recompute on every parameter change can use the
//! [`worker`] module instead: a background thread receiving
//! [`config::ConfigCommand`]s that coalesces bursts of changes and publishes
//! results through shared locks.

pub mod config;
pub mod data_container;
pub mod fft;
pub mod filters;
pub mod mask;
pub mod worker;

pub use config::{send_latest_config, ConfigCommand, ConfigContainer, ThreadCommunication};
pub use data_container::ImageStack;
pub use filters::band_pass::{apply_bandpass, FourierBandPass};
pub use filters::filter::{Filter, FilterConfig};
pub use mask::fourier_mask;
pub use worker::{main_thread, spawn_filter_thread};
