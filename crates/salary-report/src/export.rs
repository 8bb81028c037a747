//! Writing prediction breakdowns to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use salary_model::PredictionBreakdown;
use tracing::info;

use crate::error::ReportError;
use crate::rows::BreakdownRow;

/// Write one CSV row per breakdown under a header line.
///
/// The header is written even when `breakdowns` is empty.
pub fn write_breakdowns_csv(
    path: &Path,
    breakdowns: &[PredictionBreakdown],
) -> Result<(), ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| ReportError::csv(path, e))?;
    writer
        .write_record(BreakdownRow::HEADERS)
        .map_err(|e| ReportError::csv(path, e))?;
    for breakdown in breakdowns {
        writer
            .serialize(BreakdownRow::from(breakdown))
            .map_err(|e| ReportError::csv(path, e))?;
    }
    writer.flush().map_err(|e| ReportError::io(path, e))?;
    info!(path = %path.display(), rows = breakdowns.len(), "wrote CSV report");
    Ok(())
}

/// Write the full breakdowns, candidates included, as a pretty JSON array.
pub fn write_breakdowns_json(
    path: &Path,
    breakdowns: &[PredictionBreakdown],
) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, breakdowns).map_err(|e| ReportError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| ReportError::io(path, e))?;
    info!(path = %path.display(), rows = breakdowns.len(), "wrote JSON report");
    Ok(())
}
