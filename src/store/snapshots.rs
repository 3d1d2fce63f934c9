use crate::domain::ledger::DATE_FORMAT;
use crate::domain::NormalizedRow;
use crate::store::csv_io::{read_csv, write_csv_atomic};
use crate::store::{DataDir, StoreError};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

const SNAPSHOT_PREFIX: &str = "VLS_";
const SNAPSHOT_SUFFIX: &str = ".csv";

/// One day's normalized listings as written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub rows: Vec<NormalizedRow>,
}

pub fn snapshot_file_name(date: NaiveDate) -> String {
    format!("{SNAPSHOT_PREFIX}{}{SNAPSHOT_SUFFIX}", date.format(DATE_FORMAT))
}

/// Date embedded in a `VLS_<YYYY-MM-DD>.csv` name, if that is what the name is.
pub fn parse_snapshot_date(file_name: &str) -> Option<NaiveDate> {
    let date = file_name
        .strip_prefix(SNAPSHOT_PREFIX)?
        .strip_suffix(SNAPSHOT_SUFFIX)?;
    if date.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

/// Write the day's rows, replacing an earlier run from the same day.
pub fn save_snapshot(
    dir: &DataDir,
    rows: &[NormalizedRow],
    date: NaiveDate,
) -> Result<PathBuf, StoreError> {
    let path = dir.join(&snapshot_file_name(date));
    write_csv_atomic(&path, &NormalizedRow::HEADERS, rows.iter().map(NormalizedRow::record))?;
    Ok(path)
}

/// The most recent snapshot other than `date`'s own file.
/// `None` means this is the first run ever.
pub fn load_latest_snapshot_before(
    dir: &DataDir,
    date: NaiveDate,
) -> Result<Option<Snapshot>, StoreError> {
    let entries = fs::read_dir(dir.path()).map_err(|e| StoreError::file_access(dir.path(), e))?;

    let mut latest: Option<(NaiveDate, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::file_access(dir.path(), e))?;
        let name = entry.file_name();
        let Some(found) = name.to_str().and_then(parse_snapshot_date) else {
            continue;
        };
        if found == date {
            continue;
        }
        if latest.as_ref().map_or(true, |(best, _)| found > *best) {
            latest = Some((found, entry.path()));
        }
    }

    let Some((found, path)) = latest else {
        return Ok(None);
    };

    let rows = read_csv::<NormalizedRow>(&path)?;
    Ok(Some(Snapshot { date: found, rows }))
}
