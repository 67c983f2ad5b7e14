//! Simulated DSP inference engine
//!
//! Holds the loaded model for the process lifetime and times single
//! forward passes. This is a timing probe, not an inference API: the
//! model's output is materialized (to stop the clock honestly) and then
//! discarded.

use std::path::Path;
use std::time::Instant;

use burn::module::Module;
use burn::record::CompactRecorder;
use burn::tensor::{backend::Backend, Distribution, Tensor, TensorData};
use tracing::{debug, info};

use crate::inference::memory;
use crate::model::cnn::{FrameClassifier, FrameClassifierConfig};
use crate::preprocess::PreprocessedFrame;
use crate::utils::error::{BenchError, Result};

/// One timed forward pass: latency plus the resident-memory delta across it
#[derive(Debug, Clone, Copy)]
pub struct InferenceMeasurement {
    /// Wall-clock duration of the forward pass in milliseconds
    pub latency_ms: f64,
    /// RSS delta across the forward pass in megabytes (may be negative)
    pub memory_delta_mb: f64,
}

/// Inference engine holding one model instance for the process lifetime
pub struct InferenceEngine<B: Backend> {
    model: FrameClassifier<B>,
    device: B::Device,
}

impl<B: Backend> InferenceEngine<B> {
    /// Create an engine, optionally loading trained weights.
    ///
    /// With `checkpoint` set, the weights are loaded via `CompactRecorder`
    /// and a load failure propagates immediately - there is no retry. With
    /// no checkpoint the model keeps its freshly initialized weights,
    /// which is enough for a pure timing workload.
    pub fn new(device: B::Device, checkpoint: Option<&Path>) -> Result<Self> {
        let config = FrameClassifierConfig::new();
        let model = FrameClassifier::new(&config, &device);

        let model = match checkpoint {
            Some(path) => {
                info!("Loading model checkpoint from {:?}", path);
                model
                    .load_file(path, &CompactRecorder::new(), &device)
                    .map_err(|e| {
                        BenchError::Model(format!("failed to load checkpoint {:?}: {}", path, e))
                    })?
            }
            None => model,
        };

        Ok(Self { model, device })
    }

    /// Run warmup forward passes on random input to page in the weights.
    ///
    /// Not part of the measured pipeline; exposed for the CLI so the first
    /// measured image does not pay the cold-start cost when the operator
    /// asks for it.
    pub fn warmup(&self, iterations: usize, image_size: u32) {
        let size = image_size as usize;
        for i in 0..iterations {
            let input = Tensor::<B, 4>::random(
                [1, 3, size, size],
                Distribution::Uniform(0.0, 1.0),
                &self.device,
            );
            let _ = self.model.forward(input).into_data();
            debug!("Warmup iteration {}/{}", i + 1, iterations);
        }
    }

    /// Time one forward pass over a preprocessed frame.
    ///
    /// Samples process RSS before and after the call; the returned delta
    /// may be negative. The model output is discarded.
    pub fn run_inference(&self, frame: &PreprocessedFrame) -> InferenceMeasurement {
        let mem_before = memory::rss_mb().unwrap_or(0.0);

        let start = Instant::now();

        // Tensor construction is part of handing the frame to the model,
        // so it stays inside the timed section.
        let input = self.input_tensor(frame);
        let output = self.model.forward(input);
        // Force the lazy backend to materialize before stopping the clock
        let _ = output.into_data();

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let mem_after = memory::rss_mb().unwrap_or(0.0);

        InferenceMeasurement {
            latency_ms,
            memory_delta_mb: mem_after - mem_before,
        }
    }

    fn input_tensor(&self, frame: &PreprocessedFrame) -> Tensor<B, 4> {
        let height = frame.height as usize;
        let width = frame.width as usize;
        let data = TensorData::new(frame.pixels.clone(), [3, height, width]);
        Tensor::<B, 3>::from_data(data, &self.device).reshape([1, 3, height, width])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{default_device, DefaultBackend};

    fn test_frame(size: u32) -> PreprocessedFrame {
        PreprocessedFrame {
            pixels: vec![0.5; (3 * size * size) as usize],
            width: size,
            height: size,
        }
    }

    #[test]
    fn test_engine_without_checkpoint() {
        let engine = InferenceEngine::<DefaultBackend>::new(default_device(), None);
        assert!(engine.is_ok());
    }

    #[test]
    fn test_missing_checkpoint_fails() {
        let result = InferenceEngine::<DefaultBackend>::new(
            default_device(),
            Some(Path::new("/nonexistent/model.mpk")),
        );
        assert!(matches!(result, Err(BenchError::Model(_))));
    }

    #[test]
    fn test_run_inference_reports_latency() {
        let engine = InferenceEngine::<DefaultBackend>::new(default_device(), None).unwrap();
        let measurement = engine.run_inference(&test_frame(32));

        assert!(measurement.latency_ms > 0.0);
        assert!(measurement.memory_delta_mb.is_finite());
    }

    #[test]
    fn test_warmup_runs() {
        let engine = InferenceEngine::<DefaultBackend>::new(default_device(), None).unwrap();
        engine.warmup(2, 16);
    }
}
