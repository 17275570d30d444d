mod error;
mod hourly;
mod loading;
mod output;
mod processor;
mod types;
mod utils;

pub mod calendar;
pub mod solar;

pub use error::ProcessingError;
pub use processor::*;

pub use loading::csv_loader::{load_table, parse_csv_text, LoadedTable};
pub use loading::decode::{decode_text, TextEncoding};
pub use loading::error::LoadError;
pub use loading::header::{column_letter_to_index, WEATHERLINK_STRIPPED_COLUMNS};

pub use hourly::columns::*;
pub use hourly::dataset::HourlyDataset;
pub use hourly::engine::{aggregate_table, is_already_processed, process, process_table, ProcessedTable};
pub use hourly::timestamps::{default_timestamp_formats, TimelineSource};

pub use output::ordering::order_columns;
pub use output::writer::write_csv_atomic;

pub use types::hourly_record::*;
pub use types::options::ProcessingOptions;
pub use types::policy::{AggregationPolicy, TimestampFallback};
pub use types::season::Season;
pub use types::site_location::SiteLocation;
