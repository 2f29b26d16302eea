//! Configuration commands and shared state for the processing thread.

use crossbeam_channel::Sender;
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

/// Commands sent from the host to the processing thread.
///
/// Every command triggers a recompute; there is no explicit apply step.
pub enum ConfigCommand {
    /// Replaces the image stack being filtered.
    SetImage(Array3<f32>),
    SetInnerRadius(i64),
    SetOuterRadius(i64),
    SetSigma(Option<f32>),
}

/// The current bandpass parameter set held by the processing thread.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigContainer {
    pub inner_radius: i64,
    pub outer_radius: i64,
    pub sigma: Option<f32>,
}

impl Default for ConfigContainer {
    fn default() -> Self {
        ConfigContainer {
            inner_radius: 0,
            outer_radius: 75,
            sigma: Some(1.0),
        }
    }
}

/// Shared handles between the host and the processing thread.
///
/// Cloning is cheap; all fields are reference-counted. The processing thread
/// exits once every command sender has been dropped.
#[derive(Clone)]
pub struct ThreadCommunication {
    /// Command channel into the processing thread.
    pub config_tx: Sender<ConfigCommand>,
    /// Latest filtered image stack.
    pub filtered_lock: Arc<RwLock<Array3<f32>>>,
    /// Latest bandpass mask, for visualization.
    pub mask_lock: Arc<RwLock<Array2<f32>>>,
    /// Progress of the running computation in [0, 1], `None` when idle.
    pub progress_lock: Arc<RwLock<Option<f32>>>,
    /// Cooperative cancellation of the running computation.
    pub abort_flag: Arc<AtomicBool>,
}

/// Sends a command to the processing thread, logging send failures instead of
/// propagating them.
pub fn send_latest_config(thread_communication: &ThreadCommunication, command: ConfigCommand) {
    if let Err(err) = thread_communication.config_tx.send(command) {
        log::error!("error in sending config command: {err:?}");
    }
}
