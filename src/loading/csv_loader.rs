use crate::hourly::columns::has_hourly_layout;
use crate::loading::decode::{decode_text, TextEncoding};
use crate::loading::error::LoadError;
use crate::loading::header::strip_columns;
use crate::utils::column_names;
use log::{debug, info};
use polars::prelude::*;
use std::io::Cursor;

/// A parsed export, every column still text.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub frame: DataFrame,
    pub encoding: TextEncoding,
}

/// Parses decoded CSV text into a `DataFrame` of string columns.
///
/// `skip_rows` lines are discarded before the header row. Rows with more
/// fields than the header are truncated instead of failing the whole file.
pub fn parse_csv_text(text: String, skip_rows: usize) -> Result<DataFrame, LoadError> {
    if text.lines().count() <= skip_rows {
        return Err(LoadError::EmptyInput { skipped: skip_rows });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows(skip_rows)
        // Zero inference rows reads every column as String; numeric detection
        // happens later, on our own terms.
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(LoadError::CsvParse)?;

    if df.height() == 0 {
        return Err(LoadError::EmptyInput { skipped: skip_rows });
    }
    debug!("Parsed CSV with shape {:?}", df.shape());
    Ok(df)
}

/// Whether the first line of `text` is the header of an hourly output file.
/// Only the header and the first data row are parsed; a head that is not
/// valid CSV is not such a header.
fn starts_with_hourly_header(text: &str) -> bool {
    let head: String = text.lines().take(2).map(|line| format!("{line}\n")).collect();
    if head.is_empty() {
        return false;
    }
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(head.into_bytes()))
        .finish()
        .map(|header| has_hourly_layout(&column_names(&header)))
        .unwrap_or(false)
}

/// Decodes raw export bytes, parses them, and strips the configured columns.
///
/// A file that already has the hourly output layout is read from its first
/// line with nothing stripped, whatever the preamble settings say, so output
/// can be fed back in.
pub fn load_table(
    bytes: Vec<u8>,
    skip_rows: usize,
    strip_letters: &[String],
) -> Result<LoadedTable, LoadError> {
    let (text, encoding) = decode_text(bytes);
    let hourly_output = (skip_rows > 0 || !strip_letters.is_empty())
        && starts_with_hourly_header(&text);
    let frame = if hourly_output {
        info!("Input already has the hourly layout, ignoring preamble and column stripping");
        parse_csv_text(text, 0)?
    } else {
        let frame = parse_csv_text(text, skip_rows)?;
        if strip_letters.is_empty() {
            frame
        } else {
            strip_columns(&frame, strip_letters)?
        }
    };
    info!(
        "Loaded {} rows x {} columns ({} encoded)",
        frame.height(),
        frame.width(),
        encoding
    );
    Ok(LoadedTable { frame, encoding })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "Station export\n\
                          Station: Test\n\
                          Generated\n\
                          Exported by dashboard\n\
                          Units: metric\n\
                          Date & Time,Temp - °C,Hum - %,Notes\n\
                          3/7/24 12:00 AM,25.1,80,ok\n\
                          3/7/24 12:05 AM,25.3,81,ok\n";

    #[test]
    fn test_parse_with_preamble() -> Result<(), Box<dyn std::error::Error>> {
        let df = parse_csv_text(EXPORT.to_string(), 5)?;
        assert_eq!(
            column_names(&df),
            vec!["Date & Time", "Temp - °C", "Hum - %", "Notes"]
        );
        assert_eq!(df.height(), 2);
        // Everything stays text until classification.
        assert_eq!(df.column("Temp - °C")?.dtype(), &DataType::String);
        assert_eq!(df.column("Temp - °C")?.str()?.get(1), Some("25.3"));
        Ok(())
    }

    #[test]
    fn test_parse_without_preamble() -> Result<(), Box<dyn std::error::Error>> {
        let df = parse_csv_text("time,temp\n2024-01-01 00:00,1.5\n".to_string(), 0)?;
        assert_eq!(df.shape(), (1, 2));
        Ok(())
    }

    #[test]
    fn test_empty_after_skip() {
        let result = parse_csv_text("only\ntwo lines\n".to_string(), 5);
        assert!(matches!(result, Err(LoadError::EmptyInput { skipped: 5 })));
    }

    #[test]
    fn test_header_only_is_empty() {
        let result = parse_csv_text("time,temp\n".to_string(), 0);
        assert!(matches!(result, Err(LoadError::EmptyInput { .. })));
    }

    #[test]
    fn test_hourly_output_ignores_preamble_settings() -> Result<(), Box<dyn std::error::Error>> {
        let output = "Date,Start Period,End Period,Temp - °C,UV Index\n\
                      7-Mar-24,04:00:00,05:00:00,25.5,0\n\
                      7-Mar-24,05:00:00,06:00:00,25.1,0\n";
        let letters: Vec<String> = ["D", "E"].iter().map(|l| l.to_string()).collect();
        let table = load_table(output.as_bytes().to_vec(), 5, &letters)?;
        assert_eq!(
            column_names(&table.frame),
            vec!["Date", "Start Period", "End Period", "Temp - °C", "UV Index"]
        );
        assert_eq!(table.frame.height(), 2);
        Ok(())
    }

    #[test]
    fn test_preamble_export_is_not_hourly_output() {
        assert!(!starts_with_hourly_header(EXPORT));
        assert!(starts_with_hourly_header(
            "Date,Start Period,End Period\n7-Mar-24,00:00:00,01:00:00\n"
        ));
        assert!(!starts_with_hourly_header(""));
    }

    #[test]
    fn test_load_table_latin1_and_strip() -> Result<(), Box<dyn std::error::Error>> {
        let bytes = b"time,Temp - \xb0C,junk\n2024-01-01 00:00,1.5,x\n".to_vec();
        let table = load_table(bytes, 0, &["C".to_string()])?;
        assert_eq!(table.encoding, TextEncoding::Latin1);
        assert_eq!(column_names(&table.frame), vec!["time", "Temp - °C"]);
        Ok(())
    }
}
