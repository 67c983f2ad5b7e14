//! Backend abstraction - CPU NdArray backend
//!
//! The benchmark simulates DSP inference on the host, so it selects the
//! portable NdArray backend and runs everywhere without GPU drivers.

use burn::backend::ndarray::NdArrayDevice;
use burn::backend::NdArray;

/// The default backend for running the simulated inference stage
pub type DefaultBackend = NdArray;

/// Get the default device (CPU)
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

/// Get a human-readable name for the current backend
pub fn backend_name() -> &'static str {
    "NdArray (CPU)"
}
