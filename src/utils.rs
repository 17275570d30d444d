use crate::error::ProcessingError;
use log::info;
use polars::prelude::{DataFrame, DataType, PolarsResult};
use std::io;
use std::path::Path;

/// Column names of a frame as owned strings, in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Reads a column as text cells, whatever its dtype. Numbers are rendered the
/// way polars prints them; nulls stay `None`.
pub fn text_cells(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let as_text = df.column(name)?.cast(&DataType::String)?;
    Ok(as_text
        .str()?
        .into_iter()
        .map(|cell| cell.map(str::to_owned))
        .collect())
}

/// Makes sure the directory an output file will land in exists.
pub async fn ensure_parent_dir_exists(path: &Path) -> Result<(), ProcessingError> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    match tokio::fs::metadata(parent).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ProcessingError::OutputDirCreation(
            parent.to_path_buf(),
            io::Error::new(io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating output directory: {}", parent.display());
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ProcessingError::OutputDirCreation(parent.to_path_buf(), e))
        }
        Err(e) => Err(ProcessingError::OutputDirCreation(parent.to_path_buf(), e)),
    }
}
