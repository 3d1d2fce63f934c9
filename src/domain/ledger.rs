// src/domain/ledger.rs

use crate::domain::NormalizedRow;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerEntry {
    #[serde(rename = "ULIKey")]
    pub uli_key: String,
    /// Stored as written; never rewritten once the entry exists.
    #[serde(rename = "FirstSeen")]
    pub first_seen: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Village")]
    pub village: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "VLSNumber")]
    pub vls_number: String,
}

impl LedgerEntry {
    pub const HEADERS: [&'static str; 6] =
        ["ULIKey", "FirstSeen", "Address", "Village", "Price", "VLSNumber"];

    fn first_observed(row: &NormalizedRow, today: NaiveDate) -> Self {
        LedgerEntry {
            uli_key: row.uli_key.clone(),
            first_seen: today.format(DATE_FORMAT).to_string(),
            address: row.address.clone(),
            village: row.village.clone(),
            price: row.price.clone(),
            vls_number: row.vls_number.clone(),
        }
    }

    /// Field values in [`LedgerEntry::HEADERS`] order.
    pub fn record(&self) -> [&str; 6] {
        [
            self.uli_key.as_str(),
            self.first_seen.as_str(),
            self.address.as_str(),
            self.village.as_str(),
            self.price.as_str(),
            self.vls_number.as_str(),
        ]
    }

    /// `None` for blank or malformed dates. A trailing time part is tolerated.
    pub fn first_seen_date(&self) -> Option<NaiveDate> {
        let date = self.first_seen.split_whitespace().next()?;
        NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
    }
}

/// Every ULIKey ever observed, in the order it was first seen.
/// Holds at most one entry per ULIKey.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackingLedger {
    entries: Vec<LedgerEntry>,
    index: HashMap<String, usize>,
}

impl TrackingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries. A repeated ULIKey keeps its first entry.
    pub fn from_entries(entries: impl IntoIterator<Item = LedgerEntry>) -> Self {
        let mut ledger = Self::new();
        for entry in entries {
            if ledger.contains(&entry.uli_key) {
                tracing::warn!(uli_key = %entry.uli_key, "duplicate ledger entry ignored");
                continue;
            }
            ledger.push(entry);
        }
        ledger
    }

    pub fn contains(&self, uli_key: &str) -> bool {
        self.index.contains_key(uli_key)
    }

    pub fn get(&self, uli_key: &str) -> Option<&LedgerEntry> {
        self.index.get(uli_key).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: LedgerEntry) {
        self.index.insert(entry.uli_key.clone(), self.entries.len());
        self.entries.push(entry);
    }
}

/// Record today's first sightings. Returns the ledger and how many entries were added.
/// Existing entries are left exactly as they were.
pub fn update_ledger(
    mut ledger: TrackingLedger,
    today_rows: &[NormalizedRow],
    today: NaiveDate,
) -> (TrackingLedger, usize) {
    let mut added = 0;

    for row in today_rows {
        if ledger.contains(&row.uli_key) {
            continue;
        }
        ledger.push(LedgerEntry::first_observed(row, today));
        added += 1;
    }

    (ledger, added)
}
