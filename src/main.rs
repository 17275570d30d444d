use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use station_hourly::{
    AggregationPolicy, HourlyProcessor, ProcessingOptions, SiteLocation, TimestampFallback,
    WEATHERLINK_STRIPPED_COLUMNS,
};
use std::path::PathBuf;

// Deployment site of the station the tool was first written for.
const DEFAULT_LATITUDE: f64 = 7.0707;
const DEFAULT_LONGITUDE: f64 = 125.6113;
const DEFAULT_ELEVATION_M: f64 = 7.0;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Every hour with at least one sample produces a record.
    BestEffort,
    /// Only hours with exactly --samples-per-hour samples produce a record.
    CompleteHours,
}

#[derive(Parser, Debug)]
#[command(name = "station-hourly")]
#[command(version)]
#[command(about = "Aggregate a weather-station export into hourly records with solar and calendar features", long_about = None)]
struct Cli {
    /// Raw station export (CSV)
    input: PathBuf,

    /// Where to write the hourly CSV [default: overwrite INPUT]
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// How to treat hours with missing samples
    #[arg(long, value_enum)]
    policy: PolicyArg,

    /// Expected samples per hour, for complete-hours
    #[arg(long, conflicts_with = "cadence_minutes")]
    samples_per_hour: Option<u32>,

    /// Logging interval in minutes, for complete-hours (must divide 60)
    #[arg(long)]
    cadence_minutes: Option<u32>,

    /// Non-data lines before the header row
    #[arg(long)]
    skip_rows: Option<usize>,

    /// Spreadsheet column letters to drop, comma separated (e.g. D,E,AB)
    #[arg(long, value_delimiter = ',')]
    strip_columns: Vec<String>,

    /// Use the WeatherLink dashboard export layout (5 preamble rows, fixed stripped columns)
    #[arg(long)]
    weatherlink_export: bool,

    /// Fall back to a synthetic timeline with this step (minutes), starting today at midnight,
    /// when the time column cannot be parsed
    #[arg(long)]
    synthetic_step_minutes: Option<u32>,

    /// JSON file with latitude, longitude and elevation_m
    #[arg(long, conflicts_with_all = ["latitude", "longitude", "elevation"])]
    site: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_LATITUDE, allow_negative_numbers = true)]
    latitude: f64,

    #[arg(long, default_value_t = DEFAULT_LONGITUDE, allow_negative_numbers = true)]
    longitude: f64,

    #[arg(long, default_value_t = DEFAULT_ELEVATION_M, allow_negative_numbers = true)]
    elevation: f64,
}

impl Cli {
    fn policy(&self) -> Result<AggregationPolicy> {
        match (self.policy, self.samples_per_hour, self.cadence_minutes) {
            (PolicyArg::BestEffort, _, _) => Ok(AggregationPolicy::BestEffort),
            (PolicyArg::CompleteHours, Some(0), _) => {
                bail!("--samples-per-hour must be at least 1")
            }
            (PolicyArg::CompleteHours, Some(samples_per_hour), _) => {
                Ok(AggregationPolicy::CompleteHoursOnly { samples_per_hour })
            }
            (PolicyArg::CompleteHours, None, Some(cadence)) => {
                AggregationPolicy::complete_hours_for_cadence(cadence)
                    .with_context(|| format!("{cadence} minutes does not divide an hour"))
            }
            (PolicyArg::CompleteHours, None, None) => {
                bail!("--policy complete-hours needs --samples-per-hour or --cadence-minutes")
            }
        }
    }

    fn location(&self) -> Result<SiteLocation> {
        match &self.site {
            Some(path) => Ok(SiteLocation::from_json_file(path)?),
            None => Ok(SiteLocation::new(
                self.latitude,
                self.longitude,
                self.elevation,
            )),
        }
    }

    fn options(&self) -> Result<ProcessingOptions> {
        let (default_skip, default_strip) = if self.weatherlink_export {
            (
                5,
                WEATHERLINK_STRIPPED_COLUMNS
                    .iter()
                    .map(|letter| letter.to_string())
                    .collect(),
            )
        } else {
            (0, Vec::new())
        };
        let strip_columns = if self.strip_columns.is_empty() {
            default_strip
        } else {
            self.strip_columns.clone()
        };

        let timestamp_fallback = match self.synthetic_step_minutes {
            Some(0) => bail!("--synthetic-step-minutes must be at least 1"),
            Some(step_minutes) => TimestampFallback::Synthetic {
                start: Local::now().date_naive().and_time(chrono::NaiveTime::MIN),
                step_minutes,
            },
            None => TimestampFallback::Fail,
        };

        Ok(ProcessingOptions::builder()
            .location(self.location()?)
            .policy(self.policy()?)
            .skip_rows(self.skip_rows.unwrap_or(default_skip))
            .strip_columns(strip_columns)
            .timestamp_fallback(timestamp_fallback)
            .build())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let processor = HourlyProcessor::new(cli.options()?);
    let summary = processor
        .process_file()
        .input(&cli.input)
        .maybe_output(cli.output.as_deref())
        .call()
        .await
        .with_context(|| format!("processing {}", cli.input.display()))?;

    if summary.already_processed() {
        println!(
            "{} already has the hourly layout, wrote it unchanged to {}",
            summary.input.display(),
            summary.output.display()
        );
    } else {
        println!(
            "Aggregated {} rows into {} hourly records, saved to {}",
            summary.input_rows,
            summary.hourly_records,
            summary.output.display()
        );
        if !summary.excluded_columns.is_empty() {
            println!("Excluded columns: {}", summary.excluded_columns.join(", "));
        }
    }
    Ok(())
}
