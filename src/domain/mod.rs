pub mod aging;
pub mod ledger;
pub mod listing;
pub mod removals;

pub use aging::{compute_aged, AgedListing, AGED_THRESHOLD_DAYS};
pub use ledger::{update_ledger, LedgerEntry, TrackingLedger};
pub use listing::{normalize, NormalizedRow};
pub use removals::{detect_removals, RemovalOutcome};
