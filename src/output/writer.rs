use crate::error::ProcessingError;
use log::info;
use polars::prelude::*;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `df` as UTF-8 CSV to `path`.
///
/// The data goes to a temporary file next to `path` first and is moved into
/// place only once fully written, so a failed run leaves any previous file
/// untouched and never a partial one.
pub fn write_csv_atomic(df: &mut DataFrame, path: &Path) -> Result<(), ProcessingError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(dir)
        .map_err(|e| ProcessingError::OutputWrite(path.to_path_buf(), e))?;

    CsvWriter::new(&mut temp_file)
        .include_header(true)
        .finish(df)
        .map_err(|e| ProcessingError::OutputEncode(path.to_path_buf(), e))?;

    temp_file
        .persist(path)
        .map_err(|e| ProcessingError::OutputPersist(path.to_path_buf(), e.error))?;
    info!(
        "Wrote {} rows x {} columns to {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(())
}
