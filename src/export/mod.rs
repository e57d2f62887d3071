mod fs_utils;
mod json_csv;
pub mod logic;
mod model;

pub use logic::ExportLogic;
pub use model::{DailyStatExport, TaskExport, TimeLogExport};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(format: &str, rows: usize, path: &Path) {
    success(format!(
        "{} rows exported as {}: {}",
        rows,
        format.to_uppercase(),
        path.display()
    ));
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Which record kind to export.
#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum ExportKind {
    #[default]
    Logs,
    Stats,
    Tasks,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Logs => "logs",
            ExportKind::Stats => "stats",
            ExportKind::Tasks => "tasks",
        }
    }
}
