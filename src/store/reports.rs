use crate::domain::ledger::DATE_FORMAT;
use crate::domain::{AgedListing, NormalizedRow};
use crate::store::csv_io::write_csv_atomic;
use crate::store::{DataDir, StoreError};
use chrono::NaiveDate;
use std::path::PathBuf;

pub fn expired_report_file_name(date: NaiveDate) -> String {
    format!("VLS expired {}.csv", date.format(DATE_FORMAT))
}

pub fn aged_report_file_name(date: NaiveDate) -> String {
    format!("5 Month Listings {}.csv", date.format(DATE_FORMAT))
}

/// Listings that left the feed since the previous snapshot, same columns as a snapshot.
pub fn write_expired_report(
    dir: &DataDir,
    removed: &[NormalizedRow],
    date: NaiveDate,
) -> Result<PathBuf, StoreError> {
    let path = dir.join(&expired_report_file_name(date));
    write_csv_atomic(&path, &NormalizedRow::HEADERS, removed.iter().map(NormalizedRow::record))?;
    Ok(path)
}

/// Snapshot columns plus `FirstSeen` and `DaysOnMarket`, in the given order.
pub fn write_aged_report(
    dir: &DataDir,
    aged: &[AgedListing],
    date: NaiveDate,
) -> Result<PathBuf, StoreError> {
    let path = dir.join(&aged_report_file_name(date));
    let records: Vec<Vec<String>> = aged.iter().map(AgedListing::record).collect();

    write_csv_atomic(
        &path,
        &AgedListing::headers(),
        records.iter().map(|r| r.iter().map(String::as_str)),
    )?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn report_names_follow_the_dated_pattern() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(expired_report_file_name(date), "VLS expired 2024-07-04.csv");
        assert_eq!(aged_report_file_name(date), "5 Month Listings 2024-07-04.csv");
    }

    #[test]
    fn aged_report_has_age_columns() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = DataDir::open(tmp.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        let aged = vec![AgedListing {
            row: NormalizedRow {
                uli_key: "42".into(),
                ..Default::default()
            },
            first_seen: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            days_on_market: 185,
        }];

        let path = write_aged_report(&dir, &aged, date).unwrap();
        let text = fs::read_to_string(path).unwrap();
        let mut lines = text.trim_start_matches('\u{feff}').lines();

        assert!(lines.next().unwrap().ends_with("VLSNumber,FirstSeen,DaysOnMarket"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("42,"));
        assert!(row.ends_with(",2024-01-01,185"));
    }
}
