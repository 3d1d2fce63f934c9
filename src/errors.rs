// errors.rs
use crate::config::ConfigError;
use crate::mailer::MailerError;
use crate::scraper::ScraperError;
use crate::store::StoreError;
use thiserror::Error;

/// Anything that aborts a tracker run.
/// Business outcomes (no previous snapshot, nothing expired) are not errors.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Feed(#[from] ScraperError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Mail(#[from] MailerError),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
