use crate::core::{TaskStore, TimeLogStore, audit};
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::write_rows;
use crate::export::{DailyStatExport, ExportFormat, ExportKind, TaskExport, TimeLogExport};
use crate::identity::RequestContext;
use crate::storage::Storage;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the caller's records; returns how many rows were written.
    pub fn export(
        storage: &dyn Storage,
        ctx: &RequestContext,
        format: ExportFormat,
        kind: ExportKind,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let count = match kind {
            ExportKind::Logs => {
                let logs = TimeLogStore::new(storage).list(ctx)?;
                let rows: Vec<TimeLogExport> = logs.iter().map(TimeLogExport::from).collect();
                write_rows(format, &rows, path)?
            }
            ExportKind::Stats => {
                let stats = TimeLogStore::new(storage).daily_stats(ctx)?;
                let rows: Vec<DailyStatExport> = stats.iter().map(DailyStatExport::from).collect();
                write_rows(format, &rows, path)?
            }
            ExportKind::Tasks => {
                let tasks = TaskStore::new(storage).list(ctx)?;
                let rows: Vec<TaskExport> = tasks.iter().map(TaskExport::from).collect();
                write_rows(format, &rows, path)?
            }
        };

        audit::record(
            storage,
            "export",
            &path.to_string_lossy(),
            &format!("Exported {} {} as {}", count, kind.as_str(), format.as_str()),
        );

        Ok(count)
    }
}
