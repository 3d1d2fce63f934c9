// src/tracker.rs

use crate::config::{AppConfig, MailConfig};
use crate::domain::{
    compute_aged, detect_removals, normalize, update_ledger, RemovalOutcome, TrackingLedger,
    AGED_THRESHOLD_DAYS,
};
use crate::errors::TrackerResult;
use crate::mailer::BrevoMailer;
use crate::scraper::{RawListing, VlsScraper};
use crate::store::ledger::{load_ledger, save_ledger};
use crate::store::reports::{write_aged_report, write_expired_report};
use crate::store::snapshots::{load_latest_snapshot_before, save_snapshot};
use crate::store::{DataDir, StoreError};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::{info, warn};

/// What one run saw and wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub today: NaiveDate,
    pub total_received: usize,
    pub filtered: usize,
    pub expired: usize,
    pub new_listings: usize,
    pub total_tracked: usize,
    pub aged: usize,
    pub snapshot_path: PathBuf,
    pub expired_report: Option<PathBuf>,
    pub aged_report: Option<PathBuf>,
    pub ledger_path: PathBuf,
}

impl RunSummary {
    pub fn email_subject(&self) -> String {
        format!("VLS Tracker Report - {}", self.today.format("%Y-%m-%d"))
    }

    pub fn email_body(&self) -> String {
        format!(
            "Script run summary:\n\n\
             Total homes received: {}\n\
             Filtered PreOwned & Active homes: {}\n\
             New listings added to tracking database: {}\n\
             Total tracked listings: {}\n\
             Listings on market 5+ months: {}\n\
             Expired listings today: {}\n",
            self.total_received,
            self.filtered,
            self.new_listings,
            self.total_tracked,
            self.aged,
            self.expired,
        )
    }

    /// Files worth mailing: expired report, ledger, aged report.
    pub fn attachments(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        files.extend(self.expired_report.clone());
        files.push(self.ledger_path.clone());
        files.extend(self.aged_report.clone());
        files.retain(|path| path.exists());
        files
    }
}

/// Fetch today's feed, update every file in the data folder, then mail the summary.
pub fn run(config: &AppConfig) -> TrackerResult<RunSummary> {
    info!(feed = %config.feed_url, data_dir = %config.data_dir.display(), "tracker run started");

    let today = Local::now().date_naive();
    let dir = DataDir::open(&config.data_dir)?;

    let raw = VlsScraper::new(config)?.fetch_listings()?;
    let summary = process_listings(&dir, &config.ledger_file, &raw, today)?;

    info!(
        total_received = summary.total_received,
        filtered = summary.filtered,
        expired = summary.expired,
        new_listings = summary.new_listings,
        total_tracked = summary.total_tracked,
        aged = summary.aged,
        "tracker run finished"
    );

    match &config.mail {
        Some(mail) => send_summary(mail, &summary)?,
        None => info!("mail not configured, report not sent"),
    }

    Ok(summary)
}

fn send_summary(mail: &MailConfig, summary: &RunSummary) -> TrackerResult<()> {
    let attachments = summary.attachments();
    if attachments.is_empty() {
        warn!("no attachments to send");
        return Ok(());
    }

    BrevoMailer::new(mail.clone()).send_report(
        &summary.email_subject(),
        &summary.email_body(),
        &attachments,
    )?;
    info!(recipient = %mail.recipient_email, files = attachments.len(), "report email sent");
    Ok(())
}

/// Everything after the fetch. All results are computed before anything is
/// written, and the ledger is written last, so a failed write never commits
/// new ledger entries.
pub fn process_listings(
    dir: &DataDir,
    ledger_file: &str,
    raw: &[RawListing],
    today: NaiveDate,
) -> Result<RunSummary, StoreError> {
    let rows = normalize(raw);
    info!(filtered = rows.len(), "filtered pre-owned & active homes");

    let previous = load_latest_snapshot_before(dir, today)?;
    let removals = match &previous {
        Some(snapshot) => {
            info!(
                date = %snapshot.date,
                rows = snapshot.rows.len(),
                "latest previous snapshot loaded"
            );
            let outcome = detect_removals(&snapshot.rows, &rows, raw);
            match (outcome.candidates, outcome.removed.len()) {
                (0, _) => info!("no removed listings detected today"),
                (candidates, 0) => info!(candidates, "no truly expired listings found today"),
                (candidates, expired) => info!(candidates, expired, "truly expired listings found"),
            }
            outcome
        }
        None => {
            info!("no previous snapshot found, skipping removal check");
            RemovalOutcome::default()
        }
    };

    let ledger = match load_ledger(dir, ledger_file)? {
        Some(ledger) => {
            info!(tracked = ledger.len(), "loaded tracking ledger");
            ledger
        }
        None => {
            info!("created new tracking ledger");
            TrackingLedger::new()
        }
    };
    let (ledger, new_listings) = update_ledger(ledger, &rows, today);
    if new_listings > 0 {
        info!(new_listings, "added new listings to tracking ledger");
    }

    let aged = compute_aged(&ledger, &rows, today, AGED_THRESHOLD_DAYS);

    let snapshot_path = save_snapshot(dir, &rows, today)?;
    info!(file = %snapshot_path.display(), "today's listings saved");

    let expired_report = if removals.removed.is_empty() {
        None
    } else {
        let path = write_expired_report(dir, &removals.removed, today)?;
        info!(file = %path.display(), "expired listings saved");
        Some(path)
    };

    let aged_report = if aged.is_empty() {
        info!("no listings have been on the market for 5+ months");
        None
    } else {
        let path = write_aged_report(dir, &aged, today)?;
        info!(aged = aged.len(), file = %path.display(), "listings on market 5+ months saved");
        Some(path)
    };

    let ledger_path = save_ledger(dir, ledger_file, &ledger)?;
    info!(tracked = ledger.len(), "tracking ledger saved");

    Ok(RunSummary {
        today,
        total_received: raw.len(),
        filtered: rows.len(),
        expired: removals.removed.len(),
        new_listings,
        total_tracked: ledger.len(),
        aged: aged.len(),
        snapshot_path,
        expired_report,
        aged_report,
        ledger_path,
    })
}
