//! Model module for the simulated accelerator workload
//!
//! The benchmark does not drive real DSP hardware; the inference stage runs
//! a small convolutional network on the host. The network only has to be a
//! representative forward-pass workload - its outputs are discarded.

pub mod cnn;

pub use cnn::{FrameClassifier, FrameClassifierConfig};
