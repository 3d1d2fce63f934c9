// src/domain/listing.rs

use crate::scraper::RawListing;
use serde::Deserialize;

/// Resale ("pre-owned") listings only.
pub const RESALE_SALE_TYPE: &str = "P";
pub const ACTIVE_STATUS: &str = "A";

/// A feed listing flattened into the fixed snapshot shape.
/// Every field is kept as text so a snapshot re-reads exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NormalizedRow {
    #[serde(rename = "ULIKey")]
    pub uli_key: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Village")]
    pub village: String,
    #[serde(rename = "County")]
    pub county: String,
    #[serde(rename = "Model")]
    pub model: String,
    /// Digits only, e.g. "123456"; empty when the feed had no price.
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Bedrooms")]
    pub bedrooms: String,
    #[serde(rename = "Baths")]
    pub baths: String,
    #[serde(rename = "SquareFeet")]
    pub square_feet: String,
    #[serde(rename = "Garage")]
    pub garage: String,
    #[serde(rename = "Pool")]
    pub pool: String,
    #[serde(rename = "Latitude")]
    pub latitude: String,
    #[serde(rename = "Longitude")]
    pub longitude: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "SaleType")]
    pub sale_type: String,
    #[serde(rename = "YouTubeVideoId")]
    pub youtube_video_id: String,
    #[serde(rename = "VLSNumber")]
    pub vls_number: String,
}

impl NormalizedRow {
    pub const HEADERS: [&'static str; 17] = [
        "ULIKey",
        "Address",
        "Village",
        "County",
        "Model",
        "Price",
        "Bedrooms",
        "Baths",
        "SquareFeet",
        "Garage",
        "Pool",
        "Latitude",
        "Longitude",
        "Status",
        "SaleType",
        "YouTubeVideoId",
        "VLSNumber",
    ];

    pub fn from_raw(raw: &RawListing) -> Self {
        let field = |key: &str| raw.get_or_default(key, "");

        NormalizedRow {
            uli_key: field("ULIKey"),
            address: field("Address"),
            village: field("Village"),
            county: field("County"),
            model: field("Model"),
            price: clean_price(&field("Price")),
            bedrooms: field("Bedrooms"),
            baths: field("Baths"),
            square_feet: field("SquareFeet"),
            garage: field("Garage"),
            pool: field("Pool"),
            latitude: field("GISLat"),
            longitude: field("GISLong"),
            status: field("ListingStatus"),
            sale_type: field("SaleType"),
            youtube_video_id: field("YouTubeVideoId"),
            vls_number: field("VLSNumber"),
        }
    }

    /// Field values in [`NormalizedRow::HEADERS`] order.
    pub fn record(&self) -> [&str; 17] {
        [
            self.uli_key.as_str(),
            self.address.as_str(),
            self.village.as_str(),
            self.county.as_str(),
            self.model.as_str(),
            self.price.as_str(),
            self.bedrooms.as_str(),
            self.baths.as_str(),
            self.square_feet.as_str(),
            self.garage.as_str(),
            self.pool.as_str(),
            self.latitude.as_str(),
            self.longitude.as_str(),
            self.status.as_str(),
            self.sale_type.as_str(),
            self.youtube_video_id.as_str(),
            self.vls_number.as_str(),
        ]
    }

    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

pub fn is_active_resale(raw: &RawListing) -> bool {
    raw.get_or_default("SaleType", "") == RESALE_SALE_TYPE
        && raw.get_or_default("ListingStatus", "") == ACTIVE_STATUS
}

/// "$123,456" -> "123456"
pub fn clean_price(price: &str) -> String {
    price.chars().filter(|c| *c != '$' && *c != ',').collect()
}

/// Keep active resale listings, in feed order, projected into snapshot rows.
pub fn normalize(raw: &[RawListing]) -> Vec<NormalizedRow> {
    raw.iter()
        .filter(|listing| is_active_resale(listing))
        .map(NormalizedRow::from_raw)
        .collect()
}
