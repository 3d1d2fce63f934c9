// src/owners/nal.rs
//
// Florida DOR "Name-Address-Legal" (NAL) roll files: one zipped CSV per
// county, latin-1 encoded, several hundred columns. Only the owner and
// situs-address columns are kept.

use crate::owners::OwnerLookupError;
use crate::store::csv_io::write_csv_atomic;
use crate::store::{DataDir, StoreError};
use std::collections::HashSet;
use std::io::{Cursor, Read};
use std::path::PathBuf;

pub const OWNER_LOOKUP_FILE: &str = "owner_lookup.csv";

/// NAL columns carried into the lookup, in output order.
pub const KEEP_COLS: [&str; 10] = [
    "CO_NO",
    "PARCEL_ID",
    "OWN_NAME",
    "OWN_ADDR1",
    "OWN_ADDR2",
    "OWN_ADDR3",
    "PHY_ADDR1",
    "PHY_ADDR2",
    "PHY_CITY",
    "PHY_ZIPCD",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerRecord {
    /// Values for [`KEEP_COLS`]; blank when the county file lacks the column.
    /// `OWN_NAME` is trimmed and `PHY_CITY` trimmed and upper-cased.
    pub fields: [String; 10],
    pub county: String,
    /// `PHY_ADDR1 PHY_ADDR2`, trimmed and upper-cased, for matching listing addresses.
    pub full_phy_addr: String,
}

impl OwnerRecord {
    pub fn headers() -> Vec<&'static str> {
        let mut headers = KEEP_COLS.to_vec();
        headers.extend(["COUNTY", "FULL_PHY_ADDR"]);
        headers
    }

    pub fn own_name(&self) -> &str {
        &self.fields[2]
    }

    fn record(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .map(String::as_str)
            .chain([self.county.as_str(), self.full_phy_addr.as_str()])
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// The first `.csv` entry of a county archive.
pub fn extract_csv_from_zip(bytes: &[u8], county: &str) -> Result<Vec<u8>, OwnerLookupError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if !file.name().to_lowercase().ends_with(".csv") {
            continue;
        }
        tracing::info!(county, file = file.name(), "parsing NAL file");
        let mut csv = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut csv)?;
        return Ok(csv);
    }

    Err(OwnerLookupError::NoCsv {
        county: county.to_string(),
    })
}

/// Parse one county's NAL CSV. Lines with more fields than the header are skipped.
pub fn parse_nal_csv(bytes: &[u8], county: &str) -> Result<Vec<OwnerRecord>, OwnerLookupError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| latin1(h).trim().to_string())
        .collect();
    let positions: Vec<Option<usize>> = KEEP_COLS
        .iter()
        .map(|col| headers.iter().position(|h| h == col))
        .collect();

    let missing: Vec<&str> = KEEP_COLS
        .iter()
        .zip(&positions)
        .filter(|(_, pos)| pos.is_none())
        .map(|(col, _)| *col)
        .collect();
    if !missing.is_empty() {
        tracing::warn!(county, ?missing, "NAL columns not found, left blank");
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for result in reader.byte_records() {
        let row = match result {
            Ok(row) if row.len() <= headers.len() => row,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let mut fields: [String; 10] = Default::default();
        for (field, pos) in fields.iter_mut().zip(&positions) {
            if let Some(value) = pos.and_then(|p| row.get(p)) {
                *field = latin1(value);
            }
        }
        fields[2] = fields[2].trim().to_string();
        fields[8] = fields[8].trim().to_uppercase();

        let full_phy_addr = format!("{} {}", fields[6].trim(), fields[7].trim())
            .trim()
            .to_uppercase();

        records.push(OwnerRecord {
            fields,
            county: county.to_string(),
            full_phy_addr,
        });
    }

    tracing::info!(county, parcels = records.len(), skipped, columns = headers.len(), "NAL parcels loaded");
    Ok(records)
}

/// Merge county parcels, dropping those without an owner name.
pub fn build_lookup(counties: Vec<Vec<OwnerRecord>>) -> Vec<OwnerRecord> {
    let lookup: Vec<OwnerRecord> = counties
        .into_iter()
        .flatten()
        .filter(|record| !record.own_name().is_empty())
        .collect();

    let county_count = lookup.iter().map(|r| r.county.as_str()).collect::<HashSet<_>>().len();
    tracing::info!(parcels = lookup.len(), counties = county_count, "combined owner lookup");
    lookup
}

pub fn write_owner_lookup(dir: &DataDir, lookup: &[OwnerRecord]) -> Result<PathBuf, StoreError> {
    let path = dir.join(OWNER_LOOKUP_FILE);
    write_csv_atomic(&path, &OwnerRecord::headers(), lookup.iter().map(OwnerRecord::record))?;
    Ok(path)
}
