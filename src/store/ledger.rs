use crate::domain::{LedgerEntry, TrackingLedger};
use crate::store::csv_io::{read_csv, write_csv_atomic};
use crate::store::{DataDir, StoreError};
use std::path::PathBuf;

/// Load the ledger, or `None` if it has never been written.
pub fn load_ledger(dir: &DataDir, file_name: &str) -> Result<Option<TrackingLedger>, StoreError> {
    let path = dir.join(file_name);
    if !path.exists() {
        return Ok(None);
    }

    let entries = read_csv::<LedgerEntry>(&path)?;
    Ok(Some(TrackingLedger::from_entries(entries)))
}

pub fn save_ledger(
    dir: &DataDir,
    file_name: &str,
    ledger: &TrackingLedger,
) -> Result<PathBuf, StoreError> {
    let path = dir.join(file_name);
    write_csv_atomic(
        &path,
        &LedgerEntry::HEADERS,
        ledger.entries().iter().map(LedgerEntry::record),
    )?;
    Ok(path)
}
