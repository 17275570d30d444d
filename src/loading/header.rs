//! Header-level cleanup applied right after an export is parsed.

use crate::hourly::columns::COL_GHI;
use crate::loading::error::LoadError;
use crate::utils::column_names;
use log::{debug, info};
use polars::prelude::DataFrame;
use std::collections::BTreeSet;

/// Columns of the vendor dashboard export that carry nothing the hourly
/// dataset uses (high/low companions, duplicate units, battery and signal
/// diagnostics), by spreadsheet letter.
pub const WEATHERLINK_STRIPPED_COLUMNS: &[&str] = &[
    "D", "E", "G", "H", "J", "K", "M", "N", "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y",
    "AA", "AB", "AC", "AD", "AE", "AG", "AH", "AJ", "AK", "AL", "AM",
];

/// Mis-decoded degree sign, seen when a UTF-8 export went through a latin-1
/// round trip before reaching us.
const MOJIBAKE_DEGREE: &str = "Â°";

/// Converts a spreadsheet column letter (`A`, `Z`, `AA`, case-insensitive) to
/// a 0-based column index.
///
/// # Examples
///
/// ```
/// use station_hourly::column_letter_to_index;
///
/// assert_eq!(column_letter_to_index("A").unwrap(), 0);
/// assert_eq!(column_letter_to_index("ab").unwrap(), 27);
/// ```
pub fn column_letter_to_index(letters: &str) -> Result<usize, LoadError> {
    let trimmed = letters.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(LoadError::InvalidColumnLetter(letters.to_string()));
    }
    let number = trimmed.chars().try_fold(0usize, |acc, c| {
        let digit = (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        acc.checked_mul(26)?.checked_add(digit)
    });
    number
        .map(|n| n - 1)
        .ok_or_else(|| LoadError::InvalidColumnLetter(letters.to_string()))
}

/// Drops the columns at the given spreadsheet letters. Letters past the
/// table's width are ignored, so one list serves narrower exports too.
pub fn strip_columns(df: &DataFrame, letters: &[String]) -> Result<DataFrame, LoadError> {
    let names = column_names(df);
    let mut to_drop = BTreeSet::new();
    for letter in letters {
        let idx = column_letter_to_index(letter)?;
        if idx < names.len() {
            to_drop.insert(idx);
        }
    }

    if to_drop.is_empty() {
        debug!("No configured columns present to remove");
        return Ok(df.clone());
    }

    let dropped: Vec<&str> = to_drop.iter().map(|&i| names[i].as_str()).collect();
    info!("Dropping {} columns: {:?}", dropped.len(), dropped);

    let kept: Vec<&str> = names
        .iter()
        .enumerate()
        .filter(|(i, _)| !to_drop.contains(i))
        .map(|(_, name)| name.as_str())
        .collect();
    Ok(df.select(kept)?)
}

/// Repairs mis-decoded degree signs in column names and renames the first
/// solar radiation column to the GHI name the rest of the pipeline expects.
pub fn normalize_headers(df: &mut DataFrame) -> Result<(), LoadError> {
    let original = column_names(df);
    let mut names = original.clone();

    for i in 0..names.len() {
        if names[i].contains(MOJIBAKE_DEGREE) {
            let fixed = names[i].replace(MOJIBAKE_DEGREE, "°");
            if !names.contains(&fixed) {
                names[i] = fixed;
            }
        }
    }

    if !names.iter().any(|name| name == COL_GHI) {
        if let Some(solar) = names.iter_mut().find(|name| name.contains("Solar Rad")) {
            *solar = COL_GHI.to_string();
        }
    }

    if names != original {
        for (old, new) in original.iter().zip(&names).filter(|(o, n)| o != n) {
            info!("Renaming column '{}' to '{}'", old, new);
        }
        df.set_column_names(names.iter().map(String::as_str))?;
    }
    Ok(())
}
