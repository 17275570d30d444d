use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read input file '{}'", .0.display())]
    InputRead(PathBuf, #[source] std::io::Error),

    #[error("Input contains no data after skipping {skipped} preamble rows")]
    EmptyInput { skipped: usize },

    #[error("Parsing error reading CSV data")]
    CsvParse(#[source] PolarsError),

    #[error("'{0}' is not a spreadsheet column letter")]
    InvalidColumnLetter(String),

    #[error("Failed to read site configuration '{}'", .0.display())]
    SiteConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Invalid site configuration in '{}'", .0.display())]
    SiteConfig(PathBuf, #[source] serde_json::Error),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
