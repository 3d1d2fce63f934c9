mod client;
mod nal;
mod owners_error;

pub use client::{nal_url, nal_year, update_owner_lookup, County, NalClient, COUNTIES, NAL_BASE_URL};
pub use nal::{
    build_lookup, extract_csv_from_zip, parse_nal_csv, write_owner_lookup, OwnerRecord,
    OWNER_LOOKUP_FILE,
};
pub use owners_error::OwnerLookupError;
