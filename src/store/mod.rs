pub mod csv_io;
pub mod data_dir;
pub mod ledger;
pub mod reports;
pub mod snapshots;
mod store_error;

pub use data_dir::DataDir;
pub use store_error::StoreError;
