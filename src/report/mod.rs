//! Report module: CSV serialization of metric records
//!
//! The reporter owns the serialized file once written; the plotter (see
//! [`charts`]) is an independent consumer that reads it back.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::pipeline::MetricRecord;
use crate::utils::error::{BenchError, Result};

pub mod charts;

/// Write the combined record list as a CSV report.
///
/// The header row comes from the record's field names
/// (`image,cpu_time_ms,inference_time_ms,total_latency_ms,memory_mb,mode`),
/// followed by one row per record in input order. The parent directory is
/// created when missing. Fails with [`BenchError::EmptyReport`] on an
/// empty list rather than producing a zero-row file.
pub fn write_report<P: AsRef<Path>>(records: &[MetricRecord], path: P) -> Result<()> {
    let path = path.as_ref();

    if records.is_empty() {
        return Err(BenchError::EmptyReport);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Read a CSV report back into memory, in file order
pub fn read_report<P: AsRef<Path>>(path: P) -> Result<Vec<MetricRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<MetricRecord>, csv::Error>>()?;
    Ok(records)
}
