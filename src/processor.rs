//! Main entry point: turns a station export file into the hourly CSV.

use crate::error::ProcessingError;
use crate::hourly::dataset::HourlyDataset;
use crate::hourly::engine::{aggregate_table, process, ProcessedTable};
use crate::hourly::timestamps::TimelineSource;
use crate::loading::csv_loader::load_table;
use crate::loading::decode::TextEncoding;
use crate::loading::error::LoadError;
use crate::output::writer::write_csv_atomic;
use crate::types::options::ProcessingOptions;
use crate::utils::ensure_parent_dir_exists;
use bon::bon;
use log::info;
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tokio::task;

/// What a [`HourlyProcessor::process_file`] run did.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub encoding: TextEncoding,
    pub input_rows: usize,
    pub hourly_records: usize,
    pub excluded_columns: Vec<String>,
    /// `None` when the input already had the hourly layout and was kept.
    pub timeline_source: Option<TimelineSource>,
}

impl ProcessingSummary {
    pub fn already_processed(&self) -> bool {
        self.timeline_source.is_none()
    }
}

/// Runs the hourly pipeline with one fixed set of [`ProcessingOptions`].
///
/// The table-level methods ([`HourlyProcessor::aggregate`],
/// [`HourlyProcessor::process_table`]) are synchronous and touch no files.
/// [`HourlyProcessor::process_file`] adds file I/O around them.
///
/// # Examples
///
/// ```no_run
/// # use station_hourly::{AggregationPolicy, HourlyProcessor, ProcessingOptions, SiteLocation};
/// # use std::path::Path;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = ProcessingOptions::weatherlink_export(
///     SiteLocation::new(7.0707, 125.6113, 7.0),
///     AggregationPolicy::CompleteHoursOnly { samples_per_hour: 12 },
/// );
/// let processor = HourlyProcessor::new(options);
/// let summary = processor
///     .process_file()
///     .input(Path::new("export.csv"))
///     .output(Path::new("dataset.csv"))
///     .call()
///     .await?;
/// println!("{} hourly records", summary.hourly_records);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HourlyProcessor {
    options: ProcessingOptions,
}

#[bon]
impl HourlyProcessor {
    pub fn new(options: ProcessingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Aggregates an already parsed table into typed hourly records.
    pub fn aggregate(&self, table: &DataFrame) -> Result<HourlyDataset, ProcessingError> {
        aggregate_table(table, &self.options)
    }

    /// Produces the export table. Tables already in the hourly layout are
    /// returned unchanged.
    pub fn process_table(&self, table: &DataFrame) -> Result<DataFrame, ProcessingError> {
        crate::hourly::engine::process_table(table, &self.options)
    }

    /// Processes one export file and writes the hourly CSV.
    ///
    /// The input is read completely before processing starts. Without
    /// `.output(..)` the input file is overwritten with the result. Output is
    /// written atomically: on any error no output file is created or changed.
    ///
    /// # Errors
    ///
    /// [`ProcessingError::Load`] when the file cannot be read or parsed,
    /// [`ProcessingError::NoTimeColumn`] / [`ProcessingError::UnparseableTimestamp`]
    /// when no time axis can be established, and the `Output*` variants when
    /// writing fails.
    #[builder]
    pub async fn process_file(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<ProcessingSummary, ProcessingError> {
        let input = input.to_path_buf();
        let output = output.map_or_else(|| input.clone(), Path::to_path_buf);
        info!("Processing {}...", input.display());

        let bytes = tokio::fs::read(&input)
            .await
            .map_err(|e| LoadError::InputRead(input.clone(), e))?;
        ensure_parent_dir_exists(&output).await?;

        let options = self.options.clone();
        task::spawn_blocking(move || {
            let loaded = load_table(bytes, options.skip_rows, &options.strip_columns)?;
            let input_rows = loaded.frame.height();

            let (mut frame, hourly_records, excluded_columns, timeline_source) =
                match process(loaded.frame, &options)? {
                    ProcessedTable::Unchanged(frame) => (frame, input_rows, Vec::new(), None),
                    ProcessedTable::Aggregated { frame, dataset } => (
                        frame,
                        dataset.records.len(),
                        dataset.excluded_columns,
                        Some(dataset.timeline_source),
                    ),
                };

            write_csv_atomic(&mut frame, &output)?;
            Ok::<ProcessingSummary, ProcessingError>(ProcessingSummary {
                input,
                output,
                encoding: loaded.encoding,
                input_rows,
                hourly_records,
                excluded_columns,
                timeline_source,
            })
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::policy::{AggregationPolicy, TimestampFallback};
    use crate::types::site_location::SiteLocation;
    use std::fs;

    fn processor() -> HourlyProcessor {
        HourlyProcessor::new(
            ProcessingOptions::builder()
                .location(SiteLocation::new(7.0707, 125.6113, 7.0))
                .policy(AggregationPolicy::BestEffort)
                .build(),
        )
    }

    /// Two hours of five-minute samples, 20.0 to 43.0 in steps of one.
    fn two_hour_export(temp_header: &str) -> String {
        let mut text = format!("Date & Time,{temp_header}\n");
        for i in 0..24 {
            text.push_str(&format!(
                "2024-03-07 {:02}:{:02}:00,{}\n",
                10 + i / 12,
                (i % 12) * 5,
                20 + i
            ));
        }
        text
    }

    #[tokio::test]
    async fn test_process_file_overwrites_input_by_default() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("export.csv");
        fs::write(&path, two_hour_export("Temp - °C"))?;

        let summary = processor()
            .process_file()
            .input(&path)
            .call()
            .await?;
        assert_eq!(summary.output, path);
        assert_eq!(summary.input_rows, 24);
        assert_eq!(summary.hourly_records, 2);
        assert_eq!(summary.encoding, TextEncoding::Utf8);
        assert_eq!(summary.timeline_source, Some(TimelineSource::Parsed));
        assert!(!summary.already_processed());

        let written = fs::read_to_string(&path)?;
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Date,Start Period,End Period,Temp - °C,Day of Year"));
        assert!(lines[1].starts_with("7-Mar-24,10:00:00,11:00:00,25.5,"));
        assert!(lines[2].starts_with("7-Mar-24,11:00:00,12:00:00,37.5,"));
        Ok(())
    }

    #[tokio::test]
    async fn test_output_into_new_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("export.csv");
        let output = dir.path().join("out").join("hourly.csv");
        fs::write(&input, two_hour_export("Temp - °C"))?;

        processor()
            .process_file()
            .input(&input)
            .output(&output)
            .call()
            .await?;
        assert!(output.exists());
        // The input is left alone when an output path is given.
        assert_eq!(fs::read_to_string(&input)?, two_hour_export("Temp - °C"));
        Ok(())
    }

    #[tokio::test]
    async fn test_latin1_input_is_decoded() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("export.csv");
        let output = dir.path().join("hourly.csv");
        let mut bytes = two_hour_export("Temp - °C").into_bytes();
        // Replace the UTF-8 degree sign (C2 B0) with its single Latin-1 byte.
        let pos = bytes
            .windows(2)
            .position(|w| w == [0xC2, 0xB0])
            .expect("degree sign in header");
        bytes.remove(pos);
        fs::write(&input, bytes)?;

        let summary = processor()
            .process_file()
            .input(&input)
            .output(&output)
            .call()
            .await?;
        assert_eq!(summary.encoding, TextEncoding::Latin1);
        let written = fs::read_to_string(&output)?;
        assert!(written.lines().next().unwrap().contains("Temp - °C"));
        Ok(())
    }

    #[tokio::test]
    async fn test_already_processed_file_is_kept() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("hourly.csv");
        let output = dir.path().join("again.csv");
        fs::write(
            &input,
            "Date,Start Period,End Period,Temp - °C\n7-Mar-24,10:00:00,11:00:00,25.5\n",
        )?;

        let summary = processor()
            .process_file()
            .input(&input)
            .output(&output)
            .call()
            .await?;
        assert!(summary.already_processed());
        assert_eq!(summary.hourly_records, 1);
        let written = fs::read_to_string(&output)?;
        assert_eq!(
            written.lines().collect::<Vec<_>>(),
            vec![
                "Date,Start Period,End Period,Temp - °C",
                "7-Mar-24,10:00:00,11:00:00,25.5"
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_weatherlink_preset_reruns_on_own_output() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("export.csv");
        let dataset = dir.path().join("dataset.csv");
        fs::write(&input, two_hour_export("Temp - °C"))?;
        processor()
            .process_file()
            .input(&input)
            .output(&dataset)
            .call()
            .await?;
        let first_run = fs::read_to_string(&dataset)?;

        let preset = HourlyProcessor::new(ProcessingOptions::weatherlink_export(
            SiteLocation::new(7.0707, 125.6113, 7.0),
            AggregationPolicy::CompleteHoursOnly {
                samples_per_hour: 12,
            },
        ));
        let summary = preset.process_file().input(&dataset).call().await?;
        assert!(summary.already_processed());
        assert_eq!(summary.hourly_records, 2);
        assert!(summary.excluded_columns.is_empty());

        let second_run = fs::read_to_string(&dataset)?;
        assert_eq!(
            second_run.lines().next(),
            first_run.lines().next(),
            "header must survive the re-run"
        );
        assert_eq!(second_run.lines().count(), first_run.lines().count());
        Ok(())
    }

    #[tokio::test]
    async fn test_fatal_error_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("export.csv");
        let output = dir.path().join("hourly.csv");
        fs::write(&input, "Timestamp,Temp\nyesterday,20\nlater,21\n")?;

        let result = processor()
            .process_file()
            .input(&input)
            .output(&output)
            .call()
            .await;
        assert!(matches!(
            result,
            Err(ProcessingError::UnparseableTimestamp { row: 0, .. })
        ));
        assert!(!output.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_synthetic_fallback_from_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("export.csv");
        let output = dir.path().join("hourly.csv");
        fs::write(&input, "Timestamp,Temp\nyesterday,20\nlater,22\n")?;

        let start = chrono::NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let options = ProcessingOptions::builder()
            .location(SiteLocation::new(7.0707, 125.6113, 7.0))
            .policy(AggregationPolicy::BestEffort)
            .timestamp_fallback(TimestampFallback::Synthetic {
                start,
                step_minutes: 5,
            })
            .build();
        let summary = HourlyProcessor::new(options)
            .process_file()
            .input(&input)
            .output(&output)
            .call()
            .await?;
        assert_eq!(summary.timeline_source, Some(TimelineSource::Synthetic));
        assert_eq!(summary.hourly_records, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("nope.csv");
        let result = processor()
            .process_file()
            .input(&input)
            .call()
            .await;
        assert!(matches!(
            result,
            Err(ProcessingError::Load(LoadError::InputRead(_, _)))
        ));
    }
}
