//! Inference module for the simulated DSP stage
//!
//! This module provides:
//! - The engine that owns the model and times single forward passes
//! - A resident-memory probe used to report per-pass memory deltas

pub mod engine;
pub mod memory;

pub use engine::{InferenceEngine, InferenceMeasurement};
