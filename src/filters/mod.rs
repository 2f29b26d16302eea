//! Image filters operating on [`crate::data_container::ImageStack`] data.
//!
//! Each filter implements the [`filter::Filter`] trait, providing a
//! consistent interface for configuration and application. Hosts hold the
//! filter struct, mutate its public parameter fields and re-run it on every
//! change.

/// Frequency-domain bandpass filter for isolating an annular band of spatial
/// frequencies.
pub mod band_pass;

/// Core filter interfaces and shared components.
/// Defines the `Filter` trait and supporting structures used by all filter
/// implementations.
pub mod filter;
