//! Pipeline runner: the two scheduling policies
//!
//! Drives the preprocessing and inference stages over a list of image
//! paths. Neither mode runs anything concurrently; "pipelined" only
//! changes which preprocessing and inference results are paired into a
//! record (a one-position offset inherited from the measured system, kept
//! deliberately - see `run_pipelined`).

use std::path::{Path, PathBuf};

use burn::tensor::backend::Backend;

use crate::inference::engine::InferenceEngine;
use crate::pipeline::{ExecutionMode, MetricRecord};
use crate::preprocess::preprocess_image;
use crate::utils::error::{BenchError, Result};
use crate::utils::logging::ProgressLogger;
use crate::DEFAULT_IMAGE_SIZE;

/// Orchestrates the two benchmark passes over a list of images
pub struct PipelineRunner<B: Backend> {
    engine: InferenceEngine<B>,
    target_size: (u32, u32),
}

impl<B: Backend> PipelineRunner<B> {
    /// Create a runner with the default 640x640 preprocessing target
    pub fn new(engine: InferenceEngine<B>) -> Self {
        Self {
            engine,
            target_size: (DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE),
        }
    }

    /// Configure the preprocessing target resolution
    pub fn with_target_size(mut self, width: u32, height: u32) -> Self {
        self.target_size = (width, height);
        self
    }

    /// Run one pass under the given scheduling policy
    pub fn run(&self, mode: ExecutionMode, paths: &[PathBuf]) -> Result<Vec<MetricRecord>> {
        match mode {
            ExecutionMode::Sequential => self.run_sequential(paths),
            ExecutionMode::Pipelined => self.run_pipelined(paths),
        }
    }

    /// Sequential pass: preprocess, then immediately infer, per image.
    ///
    /// Emits exactly one record per input image; an empty input list
    /// yields an empty record list.
    pub fn run_sequential(&self, paths: &[PathBuf]) -> Result<Vec<MetricRecord>> {
        let mut progress = ProgressLogger::new("sequential pass", paths.len());
        let mut records = Vec::with_capacity(paths.len());

        for path in paths {
            let (frame, cpu_time_ms) = preprocess_image(path, Some(self.target_size))?;
            let measurement = self.engine.run_inference(&frame);

            records.push(MetricRecord::new(
                file_label(path),
                cpu_time_ms,
                measurement.latency_ms,
                measurement.memory_delta_mb,
                ExecutionMode::Sequential,
            ));
            progress.increment();
        }

        progress.finish();
        Ok(records)
    }

    /// Pipelined pass: one-slot lookahead buffer.
    ///
    /// For each image after the first, the current image is preprocessed
    /// and then inference runs on the *previous* frame. The emitted record
    /// carries the current image's name, the previous frame's
    /// preprocessing time, and this iteration's inference latency - the
    /// pairing is offset by one position on purpose, mirroring the system
    /// being measured. After the loop a final record is emitted for the
    /// buffered frame under the `last_frame` sentinel, so the record count
    /// equals the input count.
    ///
    /// Fails with [`BenchError::EmptyInput`] when there is nothing to
    /// buffer.
    pub fn run_pipelined(&self, paths: &[PathBuf]) -> Result<Vec<MetricRecord>> {
        let mut progress = ProgressLogger::new("pipelined pass", paths.len());
        let mut records = Vec::with_capacity(paths.len());

        let mut buffered: Option<(crate::preprocess::PreprocessedFrame, f64)> = None;

        for path in paths {
            let (frame, cpu_time_ms) = preprocess_image(path, Some(self.target_size))?;

            if let Some((prev_frame, prev_cpu_time_ms)) = buffered.take() {
                let measurement = self.engine.run_inference(&prev_frame);

                records.push(MetricRecord::new(
                    file_label(path),
                    prev_cpu_time_ms,
                    measurement.latency_ms,
                    measurement.memory_delta_mb,
                    ExecutionMode::Pipelined,
                ));
                progress.increment();
            }

            buffered = Some((frame, cpu_time_ms));
        }

        // Drain the lookahead slot
        let (frame, cpu_time_ms) = buffered.ok_or(BenchError::EmptyInput)?;
        let measurement = self.engine.run_inference(&frame);

        records.push(MetricRecord::new(
            crate::LAST_FRAME_LABEL.to_string(),
            cpu_time_ms,
            measurement.latency_ms,
            measurement.memory_delta_mb,
            ExecutionMode::Pipelined,
        ));
        progress.increment();

        progress.finish();
        Ok(records)
    }
}

/// File name portion of a path, used as the record's image identifier
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{default_device, DefaultBackend};
    use crate::LAST_FRAME_LABEL;
    use image::RgbImage;
    use tempfile::TempDir;

    fn write_test_images(dir: &Path, count: usize) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for i in 0..count {
            let path = dir.join(format!("frame_{:02}.png", i));
            RgbImage::new(24, 24).save(&path).unwrap();
            paths.push(path);
        }
        paths
    }

    fn test_runner() -> PipelineRunner<DefaultBackend> {
        let engine = InferenceEngine::<DefaultBackend>::new(default_device(), None).unwrap();
        PipelineRunner::new(engine).with_target_size(16, 16)
    }

    #[test]
    fn test_sequential_one_record_per_image() {
        let dir = TempDir::new().unwrap();
        let paths = write_test_images(dir.path(), 3);
        let runner = test_runner();

        let records = runner.run_sequential(&paths).unwrap();

        assert_eq!(records.len(), 3);
        for (record, path) in records.iter().zip(&paths) {
            assert_eq!(record.mode, ExecutionMode::Sequential);
            assert_eq!(record.image, file_label(path));
            assert_eq!(
                record.total_latency_ms,
                record.cpu_time_ms + record.inference_time_ms
            );
        }
    }

    #[test]
    fn test_sequential_empty_input() {
        let runner = test_runner();
        let records = runner.run_sequential(&[]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_pipelined_offset_pairing_and_sentinel() {
        let dir = TempDir::new().unwrap();
        let paths = write_test_images(dir.path(), 3);
        let runner = test_runner();

        let records = runner.run_pipelined(&paths).unwrap();

        // N-1 loop records plus the drained buffer record
        assert_eq!(records.len(), 3);
        // Loop records are labeled with the *current* image while carrying
        // the previous frame's preprocessing time
        assert_eq!(records[0].image, file_label(&paths[1]));
        assert_eq!(records[1].image, file_label(&paths[2]));
        assert_eq!(records[2].image, LAST_FRAME_LABEL);
        for record in &records {
            assert_eq!(record.mode, ExecutionMode::Pipelined);
            assert_eq!(
                record.total_latency_ms,
                record.cpu_time_ms + record.inference_time_ms
            );
        }
    }

    #[test]
    fn test_pipelined_empty_input_fails() {
        let runner = test_runner();
        let result = runner.run_pipelined(&[]);
        assert!(matches!(result, Err(BenchError::EmptyInput)));
    }

    #[test]
    fn test_both_modes_end_to_end() {
        let dir = TempDir::new().unwrap();
        let paths = write_test_images(dir.path(), 3);
        let runner = test_runner();

        let mut records = runner.run_sequential(&paths).unwrap();
        records.extend(runner.run_pipelined(&paths).unwrap());

        assert_eq!(records.len(), 6);
        let sequential = records
            .iter()
            .filter(|r| r.mode == ExecutionMode::Sequential)
            .count();
        let pipelined = records
            .iter()
            .filter(|r| r.mode == ExecutionMode::Pipelined)
            .count();
        assert_eq!(sequential, 3);
        assert_eq!(pipelined, 3);
    }

    #[test]
    fn test_missing_image_aborts_run() {
        let runner = test_runner();
        let paths = vec![PathBuf::from("/nonexistent/frame.png")];
        assert!(matches!(
            runner.run_sequential(&paths),
            Err(BenchError::ImageLoad(_, _))
        ));
    }
}
