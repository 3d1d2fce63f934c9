// src/domain/aging.rs

use crate::domain::ledger::DATE_FORMAT;
use crate::domain::{NormalizedRow, TrackingLedger};
use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Roughly five months.
pub const AGED_THRESHOLD_DAYS: i64 = 150;

/// A listing still active today that has been on the market at least the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct AgedListing {
    /// Today's attributes, not the ledger's copy from the first sighting.
    pub row: NormalizedRow,
    pub first_seen: NaiveDate,
    pub days_on_market: i64,
}

impl AgedListing {
    pub fn headers() -> Vec<&'static str> {
        let mut headers = NormalizedRow::HEADERS.to_vec();
        headers.extend(["FirstSeen", "DaysOnMarket"]);
        headers
    }

    pub fn record(&self) -> Vec<String> {
        let mut record: Vec<String> = self.row.record().iter().map(|s| s.to_string()).collect();
        record.push(self.first_seen.format(DATE_FORMAT).to_string());
        record.push(self.days_on_market.to_string());
        record
    }
}

/// Active listings first seen `threshold_days` or more before `today`,
/// longest on market first. Ties keep ledger order.
pub fn compute_aged(
    ledger: &TrackingLedger,
    today_rows: &[NormalizedRow],
    today: NaiveDate,
    threshold_days: i64,
) -> Vec<AgedListing> {
    if ledger.is_empty() || today_rows.is_empty() {
        return Vec::new();
    }

    let mut active: HashMap<&str, &NormalizedRow> = HashMap::with_capacity(today_rows.len());
    for row in today_rows {
        active.entry(row.uli_key.as_str()).or_insert(row);
    }

    let mut aged: Vec<AgedListing> = ledger
        .entries()
        .iter()
        .filter_map(|entry| {
            let row = active.get(entry.uli_key.as_str())?;
            let Some(first_seen) = entry.first_seen_date() else {
                tracing::warn!(
                    uli_key = %entry.uli_key,
                    first_seen = %entry.first_seen,
                    "unreadable FirstSeen, skipping age check"
                );
                return None;
            };

            let days_on_market = (today - first_seen).num_days();
            (days_on_market >= threshold_days).then(|| AgedListing {
                row: (*row).clone(),
                first_seen,
                days_on_market,
            })
        })
        .collect();

    aged.sort_by_key(|listing| Reverse(listing.days_on_market));
    aged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::update_ledger;
    use chrono::Duration;

    fn row(key: &str, price: &str) -> NormalizedRow {
        NormalizedRow {
            uli_key: key.to_string(),
            price: price.to_string(),
            status: "A".to_string(),
            sale_type: "P".to_string(),
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    }

    fn ledger_seen_on(sightings: &[(&str, NaiveDate)]) -> TrackingLedger {
        sightings
            .iter()
            .fold(TrackingLedger::new(), |ledger, (key, day)| {
                update_ledger(ledger, &[row(key, "100")], *day).0
            })
    }

    #[test]
    fn boundary_is_inclusive() {
        let ledger = ledger_seen_on(&[
            ("at", today() - Duration::days(150)),
            ("under", today() - Duration::days(149)),
        ]);

        let aged = compute_aged(&ledger, &[row("at", "100"), row("under", "100")], today(), AGED_THRESHOLD_DAYS);

        assert_eq!(aged.len(), 1);
        assert_eq!(aged[0].row.uli_key, "at");
        assert_eq!(aged[0].days_on_market, 150);
    }

    #[test]
    fn only_listings_active_today() {
        let ledger = ledger_seen_on(&[("gone", today() - Duration::days(400))]);
        assert!(compute_aged(&ledger, &[], today(), AGED_THRESHOLD_DAYS).is_empty());
    }

    #[test]
    fn sorted_longest_first_with_current_attributes() {
        let ledger = ledger_seen_on(&[
            ("a", today() - Duration::days(160)),
            ("b", today() - Duration::days(300)),
            ("c", today() - Duration::days(200)),
        ]);

        let aged = compute_aged(
            &ledger,
            &[row("a", "1"), row("b", "2"), row("c", "3")],
            today(),
            AGED_THRESHOLD_DAYS,
        );

        let keys: Vec<&str> = aged.iter().map(|a| a.row.uli_key.as_str()).collect();
        assert_eq!(keys, vec!["b", "c", "a"]);
        // The ledger recorded "100"; the report shows today's price.
        assert_eq!(aged[0].row.price, "2");
        assert_eq!(aged[0].first_seen, today() - Duration::days(300));
    }

    #[test]
    fn report_record_appends_age_columns() {
        let listing = AgedListing {
            row: row("a", "1"),
            first_seen: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            days_on_market: 243,
        };

        let headers = AgedListing::headers();
        let record = listing.record();
        assert_eq!(headers.len(), 19);
        assert_eq!(record.len(), 19);
        assert_eq!(headers[17], "FirstSeen");
        assert_eq!(record[17], "2024-01-02");
        assert_eq!(record[18], "243");
    }
}
