//! Error Handling Module
//!
//! Defines custom error types for the edgebench library.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for edgebench operations
#[derive(Error, Debug)]
pub enum BenchError {
    /// Error loading or decoding an image. I/O failures and decode
    /// failures collapse into this single variant.
    #[error("Failed to load image at '{0}': {1}")]
    ImageLoad(PathBuf, String),

    /// Error loading the model or its checkpoint
    #[error("Model error: {0}")]
    Model(String),

    /// Pipelined mode was invoked with nothing to buffer
    #[error("Pipelined mode requires at least one input image")]
    EmptyInput,

    /// Report writing was asked to serialize an empty record list
    #[error("Cannot write a report from an empty record list")]
    EmptyReport,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization/deserialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience Result type for edgebench operations
pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BenchError::Model("checkpoint missing".to_string());
        assert_eq!(format!("{}", err), "Model error: checkpoint missing");
    }

    #[test]
    fn test_image_load_error() {
        let path = PathBuf::from("/path/to/frame.jpg");
        let err = BenchError::ImageLoad(path, "file not found".to_string());
        assert!(format!("{}", err).contains("frame.jpg"));
    }

    #[test]
    fn test_empty_report_display() {
        let err = BenchError::EmptyReport;
        assert!(format!("{}", err).contains("empty record list"));
    }
}
