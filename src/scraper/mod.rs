pub mod models;
mod scraper;
mod scraper_error;

pub use models::{parse_feed, RawListing};
pub use scraper::VlsScraper;
pub use scraper_error::ScraperError;
