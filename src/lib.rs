//! # Edgebench
//!
//! A benchmarking harness that compares two execution strategies for a
//! two-stage edge workload: CPU-side image preprocessing followed by a
//! simulated DSP inference step (a small CNN running on the host via the
//! Burn framework).
//!
//! ## Execution modes
//!
//! - **Sequential**: each image is preprocessed and then immediately run
//!   through the model; timings for both stages land in the same record.
//! - **Pipelined**: a one-slot lookahead buffer pairs the *previous*
//!   image's preprocessing time with the *current* iteration's inference
//!   latency. Both stages still run one after another on the same thread;
//!   only the record pairing changes.
//!
//! ## Modules
//!
//! - `backend`: Burn backend selection (CPU/NdArray)
//! - `model`: the CNN standing in for the accelerator-side model
//! - `preprocess`: image loading, resizing, and normalization with timing
//! - `inference`: the timed forward pass and resident-memory probing
//! - `pipeline`: the two scheduling policies and per-image metric records
//! - `report`: CSV serialization and SVG comparison charts
//! - `utils`: logging and error handling
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use edgebench::backend::{default_device, DefaultBackend};
//! use edgebench::{list_images, InferenceEngine, PipelineRunner};
//!
//! # fn main() -> edgebench::Result<()> {
//! let images = list_images(std::path::Path::new("data/images"))?;
//! let engine = InferenceEngine::<DefaultBackend>::new(default_device(), None)?;
//! let runner = PipelineRunner::new(engine);
//!
//! let mut records = runner.run_sequential(&images)?;
//! records.extend(runner.run_pipelined(&images)?);
//! edgebench::report::write_report(&records, "results/metrics.csv")?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod inference;
pub mod model;
pub mod pipeline;
pub mod preprocess;
pub mod report;
pub mod utils;

// Re-export commonly used items for convenience
pub use inference::engine::{InferenceEngine, InferenceMeasurement};
pub use model::cnn::{FrameClassifier, FrameClassifierConfig};
pub use pipeline::runner::PipelineRunner;
pub use pipeline::{ExecutionMode, MetricRecord};
pub use preprocess::{list_images, preprocess_image, PreprocessedFrame};
pub use report::charts::ModeAverages;
pub use report::{read_report, write_report};
pub use utils::error::{BenchError, Result};

/// Default target resolution for preprocessing (square, in pixels)
pub const DEFAULT_IMAGE_SIZE: u32 = 640;

/// Label used for the final buffered record emitted by the pipelined mode
pub const LAST_FRAME_LABEL: &str = "last_frame";

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
