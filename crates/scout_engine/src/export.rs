use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use scout_logging::scout_info;

use crate::persist::{AtomicFileWriter, PersistError};

pub const CSV_FILE_PREFIX: &str = "linkedin_employee_counts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub path: PathBuf,
    /// Data rows written, header excluded.
    pub row_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// `linkedin_employee_counts_<YYYY-MM-DD>.csv`
pub fn csv_export_filename(date: NaiveDate) -> String {
    format!("{CSV_FILE_PREFIX}_{}.csv", date.format("%Y-%m-%d"))
}

/// Writes an already rendered CSV document of `row_count` data rows into
/// `output_dir`. A second export on the same day replaces the first.
pub fn write_csv_export(
    output_dir: &Path,
    date: NaiveDate,
    contents: &str,
    row_count: usize,
) -> Result<CsvExport, ExportError> {
    let filename = csv_export_filename(date);
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let path = writer.write(&filename, contents)?;
    scout_info!("Exported {} rows to {:?}", row_count, path);
    Ok(CsvExport { path, row_count })
}
