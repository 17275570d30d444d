use crate::loading::error::LoadError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("No date or time column found, available columns: {available:?}")]
    NoTimeColumn { available: Vec<String> },

    #[error("Could not parse '{value}' in column '{column}' (row {row}) as a timestamp")]
    UnparseableTimestamp {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Failed to create output directory '{}'", .0.display())]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("I/O error writing output file '{}'", .0.display())]
    OutputWrite(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing output file '{}'", .0.display())]
    OutputEncode(PathBuf, #[source] PolarsError),

    #[error("Failed to move finished output into place at '{}'", .0.display())]
    OutputPersist(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
