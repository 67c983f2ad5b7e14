//! Utility modules for logging and error handling

pub mod error;
pub mod logging;

pub use error::{BenchError, Result};
pub use logging::{init_logging, LogConfig, ProgressLogger};
