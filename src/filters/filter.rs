//! The `Filter` trait and its supporting structures.
//!
//! Filters are structs with public parameter fields. The host mutates the
//! fields (typically from auto-generated parameter widgets) and re-runs
//! [`Filter::filter`] on every change; a filter invocation is a pure,
//! single-shot computation that reads the input and returns a fresh output.

use crate::data_container::ImageStack;
use std::fmt::Debug;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

/// The `Filter` trait defines the structure and behavior of an image filter.
///
/// Filters must implement:
/// - A `new` function to initialize a filter with default parameters.
/// - A `reset` function that is called when a new image is loaded.
/// - A `config` function to provide metadata for the filter.
/// - A `filter` function to apply the filter to an [`ImageStack`].
pub trait Filter: Send + Sync + Debug + CloneBoxedFilter {
    /// Creates a new instance of the filter with default parameters.
    fn new() -> Self
    where
        Self: Sized;

    /// Resets the filter to its initial state for a new image of the given
    /// shape.
    fn reset(&mut self, shape: &[usize]);

    /// Returns the filter configuration, including name and description.
    fn config(&self) -> FilterConfig;

    /// Applies the filter to the given [`ImageStack`].
    ///
    /// # Arguments
    /// - `input`: The stack to be processed; it is read-only for the filter.
    /// - `progress_lock`: Progress of the running computation in [0, 1], or
    ///   `None` when idle. Long-running filters update this per work unit.
    /// - `abort_flag`: Cooperative cancellation; filters check it between
    ///   work units and return early with whatever is complete.
    ///
    /// # Returns
    /// A new [`ImageStack`] containing the filtered data.
    fn filter(
        &mut self,
        input: &ImageStack,
        progress_lock: &mut Arc<RwLock<Option<f32>>>,
        abort_flag: &Arc<AtomicBool>,
    ) -> ImageStack;
}

/// Metadata of a filter.
///
/// # Fields
/// - `name`: A human-readable name for the filter.
/// - `description`: A detailed description of what the filter does.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub name: String,
    pub description: String,
}

/// A trait to allow cloning of boxed filters.
/// This is necessary because `Box<dyn Filter>` cannot be cloned directly.
pub trait CloneBoxedFilter {
    fn clone_box(&self) -> Box<dyn Filter>;
}

impl<T> CloneBoxedFilter for T
where
    T: 'static + Filter + Clone,
{
    fn clone_box(&self) -> Box<dyn Filter> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Filter> {
    fn clone(&self) -> Box<dyn Filter> {
        self.as_ref().clone_box()
    }
}
