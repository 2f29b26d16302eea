//! Background processing thread driving the bandpass filter.
//!
//! The host recomputes on every parameter change with no explicit apply step,
//! so this thread acts as the reactive boundary: it receives
//! [`ConfigCommand`]s, coalesces bursts of changes into a single computation
//! and publishes the results through shared locks. The filter itself stays a
//! pure function; throttling and cancellation live only here.

use crate::config::{ConfigCommand, ConfigContainer, ThreadCommunication};
use crate::data_container::ImageStack;
use crate::filters::band_pass::FourierBandPass;
use crate::filters::filter::Filter;
use crossbeam_channel::Receiver;
use ndarray::{Array2, Array3};
use std::sync::atomic::{AtomicBool, Ordering::Relaxed};
use std::sync::{Arc, RwLock};
use std::thread::JoinHandle;
use std::time::Instant;

/// Spawns the processing thread and returns the communication handles for it.
///
/// The thread runs until the returned [`ThreadCommunication`] and all of its
/// clones have been dropped.
pub fn spawn_filter_thread() -> (ThreadCommunication, JoinHandle<()>) {
    let (config_tx, config_rx) = crossbeam_channel::unbounded();
    let thread_communication = ThreadCommunication {
        config_tx,
        filtered_lock: Arc::new(RwLock::new(Array3::zeros((0, 0, 0)))),
        mask_lock: Arc::new(RwLock::new(Array2::zeros((0, 0)))),
        progress_lock: Arc::new(RwLock::new(None)),
        abort_flag: Arc::new(AtomicBool::new(false)),
    };

    let filtered_lock = thread_communication.filtered_lock.clone();
    let mask_lock = thread_communication.mask_lock.clone();
    let progress_lock = thread_communication.progress_lock.clone();
    let abort_flag = thread_communication.abort_flag.clone();
    let handle = std::thread::spawn(move || {
        main_thread(filtered_lock, mask_lock, progress_lock, abort_flag, config_rx);
    });

    (thread_communication, handle)
}

/// Receives configuration commands and recomputes the bandpass filter.
///
/// Pending commands are drained before each computation, so a burst of
/// parameter changes produces a single recompute of the newest state instead
/// of one per change. When no image has been loaded yet the computation is
/// simply not performed.
pub fn main_thread(
    filtered_lock: Arc<RwLock<Array3<f32>>>,
    mask_lock: Arc<RwLock<Array2<f32>>>,
    progress_lock: Arc<RwLock<Option<f32>>>,
    abort_flag: Arc<AtomicBool>,
    config_rx: Receiver<ConfigCommand>,
) {
    let mut config = ConfigContainer::default();
    let mut stack = ImageStack::default();
    let mut band_pass = FourierBandPass::new();
    let mut progress_lock = progress_lock;

    while let Ok(command) = config_rx.recv() {
        // coalesce queued commands, only the newest state gets computed
        let mut pending = Some(command);
        while let Some(config_command) = pending {
            match config_command {
                ConfigCommand::SetImage(data) => {
                    band_pass.reset(data.shape());
                    stack = ImageStack::from_planes(data);
                }
                ConfigCommand::SetInnerRadius(inner_radius) => {
                    config.inner_radius = inner_radius;
                }
                ConfigCommand::SetOuterRadius(outer_radius) => {
                    config.outer_radius = outer_radius;
                }
                ConfigCommand::SetSigma(sigma) => {
                    config.sigma = sigma;
                }
            }
            pending = config_rx.try_recv().ok();
        }

        if stack.is_empty() {
            log::warn!("no image loaded, skipping bandpass update");
            continue;
        }

        band_pass.inner_radius = config.inner_radius;
        band_pass.outer_radius = config.outer_radius;
        band_pass.sigma = config.sigma;

        abort_flag.store(false, Relaxed);
        let start = Instant::now();
        let output = band_pass.filter(&stack, &mut progress_lock, &abort_flag);
        if abort_flag.load(Relaxed) {
            log::info!("bandpass update aborted");
            continue;
        }
        log::debug!("bandpass update took {:?}", start.elapsed());

        if let Ok(mut mask) = mask_lock.write() {
            *mask = output.mask.clone();
        }
        if let Ok(mut filtered) = filtered_lock.write() {
            *filtered = output.filtered.clone();
        }
        stack = output;
    }
}
