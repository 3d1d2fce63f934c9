use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OwnerLookupError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("bad NAL archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("no CSV found in NAL archive for {county}")]
    NoCsv { county: String },

    #[error("cannot read NAL file: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad NAL CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
