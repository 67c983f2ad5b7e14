//! Pipeline module: execution modes and per-image metric records
//!
//! One [`MetricRecord`] is emitted per processed image per mode. Records
//! are immutable once created and flow from the runner to the reporter as
//! a plain `Vec`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod runner;

pub use runner::PipelineRunner;

/// Scheduling policy used for a benchmark pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Preprocess and infer each image back to back
    Sequential,
    /// One-slot lookahead: infer on the previous frame after preprocessing
    /// the current one. The stages still run strictly one after another;
    /// only the record pairing changes.
    Pipelined,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Sequential => write!(f, "sequential"),
            ExecutionMode::Pipelined => write!(f, "pipelined"),
        }
    }
}

/// One observation per processed image
///
/// Field names double as the CSV header, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Image identifier (file name, or the `last_frame` sentinel)
    pub image: String,
    /// Preprocessing wall-clock time in milliseconds
    pub cpu_time_ms: f64,
    /// Forward-pass wall-clock time in milliseconds
    pub inference_time_ms: f64,
    /// Sum of the two stage times in milliseconds
    pub total_latency_ms: f64,
    /// RSS delta across the forward pass in megabytes (may be negative)
    pub memory_mb: f64,
    /// Scheduling policy that produced this record
    pub mode: ExecutionMode,
}

impl MetricRecord {
    /// Create a record; the total is always the sum of the stage times.
    pub fn new(
        image: String,
        cpu_time_ms: f64,
        inference_time_ms: f64,
        memory_mb: f64,
        mode: ExecutionMode,
    ) -> Self {
        Self {
            image,
            cpu_time_ms,
            inference_time_ms,
            total_latency_ms: cpu_time_ms + inference_time_ms,
            memory_mb,
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_display() {
        assert_eq!(ExecutionMode::Sequential.to_string(), "sequential");
        assert_eq!(ExecutionMode::Pipelined.to_string(), "pipelined");
    }

    #[test]
    fn test_record_total_is_sum_of_stages() {
        let record = MetricRecord::new(
            "frame.jpg".to_string(),
            12.5,
            7.5,
            -0.25,
            ExecutionMode::Sequential,
        );
        assert_eq!(record.total_latency_ms, 20.0);
        assert_eq!(record.memory_mb, -0.25);
    }
}
