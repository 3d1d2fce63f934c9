// client.rs
use crate::owners::nal::{build_lookup, extract_csv_from_zip, parse_nal_csv, write_owner_lookup};
use crate::owners::{OwnerLookupError, OwnerRecord};
use crate::store::DataDir;
use chrono::{Datelike, NaiveDate};
use reqwest::blocking::Client;
use std::path::PathBuf;
use std::time::Duration;

pub const NAL_BASE_URL: &str = "https://floridarevenue.com/property/dataportal/Documents/PTO%20Data%20Portal/Tax%20Roll%20Data%20Files/NAL";

const USER_AGENT: &str = concat!("vls_tracker/", env!("CARGO_PKG_VERSION"));
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct County {
    pub name: &'static str,
    /// Florida DOR county number, as used in the NAL file names.
    pub code: u8,
}

pub const COUNTIES: [County; 3] = [
    County { name: "Lake", code: 35 },
    County { name: "Marion", code: 42 },
    County { name: "Sumter", code: 61 },
];

/// Final rolls are published in the fall; before November the latest
/// complete roll is last year's.
pub fn nal_year(today: NaiveDate) -> i32 {
    if today.month() < 11 {
        today.year() - 1
    } else {
        today.year()
    }
}

pub fn nal_url(base_url: &str, county: County, year: i32) -> String {
    format!(
        "{}/{year}F/{}%20{}%20Final%20NAL%20{year}.zip",
        base_url.trim_end_matches('/'),
        county.name,
        county.code
    )
}

pub struct NalClient {
    client: Client,
    base_url: String,
}

impl NalClient {
    pub fn new(base_url: &str) -> Result<Self, OwnerLookupError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(DOWNLOAD_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn get_zip(&self, url: &str) -> Result<Vec<u8>, OwnerLookupError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(OwnerLookupError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }

    /// Download the county archive for `year`, falling back to the previous
    /// roll when the server has no file for `year` yet.
    pub fn download(&self, county: County, year: i32) -> Result<Vec<u8>, OwnerLookupError> {
        let url = nal_url(&self.base_url, county, year);
        tracing::info!(county = county.name, %url, "downloading NAL roll");

        match self.get_zip(&url) {
            Err(OwnerLookupError::Status { status, .. }) => {
                tracing::warn!(county = county.name, year, status, "NAL roll not available, trying previous year");
                self.get_zip(&nal_url(&self.base_url, county, year - 1))
            }
            other => other,
        }
    }

    pub fn load_county(&self, county: County, year: i32) -> Result<Vec<OwnerRecord>, OwnerLookupError> {
        let archive = self.download(county, year)?;
        let csv = extract_csv_from_zip(&archive, county.name)?;
        parse_nal_csv(&csv, county.name)
    }
}

/// Rebuild `owner_lookup.csv` from every county that loads. A county that
/// fails is logged and left out. Returns `None`, writing nothing, when no
/// county loaded.
pub fn update_owner_lookup(
    client: &NalClient,
    dir: &DataDir,
    counties: &[County],
    year: i32,
) -> Result<Option<(PathBuf, usize)>, OwnerLookupError> {
    let mut loaded = Vec::new();
    for &county in counties {
        match client.load_county(county, year) {
            Ok(records) => loaded.push(records),
            Err(e) => tracing::error!(county = county.name, error = %e, "skipping county"),
        }
    }

    if loaded.is_empty() {
        tracing::error!("no county data loaded, owner lookup left unchanged");
        return Ok(None);
    }

    let lookup = build_lookup(loaded);
    let path = write_owner_lookup(dir, &lookup)?;
    tracing::info!(path = %path.display(), parcels = lookup.len(), "owner lookup saved");
    Ok(Some((path, lookup.len())))
}
