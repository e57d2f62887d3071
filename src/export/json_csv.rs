use super::{ExportFormat, notify_export_success};
use crate::errors::AppResult;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Write `rows` to `path` in the requested format; returns the row count.
pub(crate) fn write_rows<T: Serialize>(
    format: ExportFormat,
    rows: &[T],
    path: &Path,
) -> AppResult<usize> {
    match format {
        ExportFormat::Json => {
            fs::write(path, serde_json::to_string_pretty(rows)?)?;
        }
        ExportFormat::Csv => {
            // Header row comes from the serde field names.
            let mut wtr = csv::Writer::from_path(path)?;
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
    }

    notify_export_success(format.as_str(), rows.len(), path);
    Ok(rows.len())
}
