//! Time-Series Writer
//!
//! Append-only JSONL output of network metadata and per-vertex frames.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use opinion_events::{NetworkMetadata, OpinionFrame, Record, RunSummary};

use crate::error::SimError;

/// File name of the time series inside the output directory
pub const TIMESERIES_FILE: &str = "timeseries.jsonl";
/// File name of the run summary inside the output directory
pub const SUMMARY_FILE: &str = "summary.json";

/// Writes one JSON record per line
pub struct TimeSeriesWriter {
    writer: Option<BufWriter<File>>,
    frames_written: u64,
}

impl TimeSeriesWriter {
    /// Create a writer that truncates and writes to `path`
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            frames_written: 0,
        })
    }

    /// Create a writer that discards records (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            frames_written: 0,
        }
    }

    /// Number of frames written so far
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn write_metadata(&mut self, metadata: &NetworkMetadata) -> Result<(), SimError> {
        self.write_record(&Record::Metadata(metadata.clone()))
    }

    pub fn write_frame(&mut self, frame: &OpinionFrame) -> Result<(), SimError> {
        self.frames_written += 1;
        self.write_record(&Record::Frame(frame.clone()))
    }

    fn write_record(&mut self, record: &Record) -> Result<(), SimError> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for TimeSeriesWriter {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush time series writer: {}", e);
        }
    }
}

/// Write the run summary as pretty-printed JSON
pub fn write_summary(summary: &RunSummary, path: impl AsRef<Path>) -> Result<(), SimError> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}
