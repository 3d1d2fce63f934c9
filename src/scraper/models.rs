use crate::scraper::ScraperError;
use serde::Deserialize;
use serde_json::{Map, Value};

// body
//  └── HomeList: [ listing, ... ]
//       ├── ULIKey
//       ├── SaleType        ("P" = pre-owned / resale)
//       ├── ListingStatus   ("A" = active)
//       ├── Address, Village, County, Model
//       ├── Price           ("$123,456")
//       ├── Bedrooms, Baths, SquareFeet, Garage, Pool
//       ├── GISLat, GISLong
//       ├── YouTubeVideoId
//       └── VLSNumber

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(rename = "HomeList", default)]
    home_list: Option<Vec<RawListing>>,
}

/// One listing object exactly as the feed sent it.
/// No shape is assumed; fields are read through [`RawListing::get_or_default`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawListing(Map<String, Value>);

impl RawListing {
    /// Field value as text. Numbers and booleans are rendered, `null` and
    /// missing keys fall back to `default`.
    pub fn get_or_default(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Null) | None => default.to_string(),
            Some(other) => other.to_string(),
        }
    }

    pub fn uli_key(&self) -> String {
        self.get_or_default("ULIKey", "")
    }
}

/// Parse a feed body into its listings.
///
/// A missing or `null` `HomeList` yields zero listings; anything else that is
/// not a list of objects is a parse error.
pub fn parse_feed(body: &str) -> Result<Vec<RawListing>, ScraperError> {
    let feed: FeedResponse =
        serde_json::from_str(body).map_err(|e| ScraperError::Parse(e.to_string()))?;

    match feed.home_list {
        Some(listings) => Ok(listings),
        None => {
            tracing::warn!("feed response has no HomeList; treating as zero listings");
            Ok(Vec::new())
        }
    }
}
