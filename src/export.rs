//! Series Export
//!
//! Writes an aggregated signup series as CSV or JSON for offline analysis.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::aggregate::SignupSeries;

/// Output format for exported series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unknown export format: {0} (expected csv or json)")]
    UnknownFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the series to any writer
pub fn write_series<W: Write>(
    series: &SignupSeries,
    format: ExportFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            csv_writer.write_record(["label", "signups"])?;
            for point in &series.points {
                csv_writer.write_record([point.label.as_str(), point.signups.to_string().as_str()])?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, series)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

/// Write the series to a file, creating parent directories
pub fn export_to_path(
    series: &SignupSeries,
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = BufWriter::new(File::create(path)?);
    write_series(series, format, file)?;

    tracing::info!(
        path = %path.display(),
        points = series.len(),
        skipped = series.skipped,
        "Exported signup series"
    );
    Ok(())
}
