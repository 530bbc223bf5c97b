use cobench_common::{CoBenchError, Result, RAW_CSV_HEADER};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::clock::TimeZero;
use crate::recording::Recording;
use crate::timings::Timings;

/// Write the raw per-request table: `arrival;start;finish` relative to `time_zero`,
/// followed by the six derived intervals as raw deltas.
pub fn write_raw_csv<W: Write>(
    writer: W,
    recording: &Recording,
    timings: &Timings,
    time_zero: TimeZero,
) -> Result<()> {
    if timings.len() != recording.len() {
        return Err(CoBenchError::LengthMismatch { expected: recording.len(), actual: timings.len() });
    }

    let mut csv = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(RAW_CSV_HEADER).map_err(export_error)?;
    for (i, (arrival, start, finish)) in recording.rows().enumerate() {
        let row = [
            time_zero.relative(arrival),
            time_zero.relative(start),
            time_zero.relative(finish),
            timings.idle()[i],
            timings.wait()[i],
            timings.dequeue()[i],
            timings.processing()[i],
            timings.gross_processing()[i],
            timings.service()[i],
        ];
        csv.write_record(row.iter().map(|v| v.to_string())).map_err(export_error)?;
    }
    csv.flush().map_err(|e| CoBenchError::Export(e.to_string()))?;
    Ok(())
}

/// Create (or truncate) `path` and write the raw table into it.
pub fn export_raw_csv(
    path: &Path,
    recording: &Recording,
    timings: &Timings,
    time_zero: TimeZero,
) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| CoBenchError::Export(format!("{}: {e}", path.display())))?;
    write_raw_csv(file, recording, timings, time_zero)?;
    info!(rows = recording.len(), path = %path.display(), "raw table written");
    Ok(())
}

fn export_error(e: csv::Error) -> CoBenchError {
    CoBenchError::Export(e.to_string())
}
