// src/domain/removals.rs

use crate::domain::NormalizedRow;
use crate::scraper::RawListing;
use std::collections::HashSet;

#[derive(Debug, Default, PartialEq)]
pub struct RemovalOutcome {
    /// Previously active listings missing from today's filtered rows.
    pub candidates: usize,
    /// Candidates that are also gone from the unfiltered feed, as last seen.
    pub removed: Vec<NormalizedRow>,
}

/// Find listings that were active in the previous snapshot and have left the feed.
///
/// A listing that only dropped out of today's filter (status change, sale type
/// change) is still in `today_raw` and is not reported.
pub fn detect_removals(
    previous: &[NormalizedRow],
    today_rows: &[NormalizedRow],
    today_raw: &[RawListing],
) -> RemovalOutcome {
    let today_keys: HashSet<&str> = today_rows.iter().map(|r| r.uli_key.as_str()).collect();

    let candidates: Vec<&NormalizedRow> = previous
        .iter()
        .filter(|row| row.is_active() && !today_keys.contains(row.uli_key.as_str()))
        .collect();

    if candidates.is_empty() {
        return RemovalOutcome::default();
    }

    let raw_keys: HashSet<String> = today_raw.iter().map(RawListing::uli_key).collect();

    let removed = candidates
        .iter()
        .filter(|row| !raw_keys.contains(&row.uli_key))
        .map(|row| (*row).clone())
        .collect();

    RemovalOutcome {
        candidates: candidates.len(),
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(key: &str, status: &str) -> NormalizedRow {
        NormalizedRow {
            uli_key: key.to_string(),
            address: format!("{key} Main St"),
            status: status.to_string(),
            sale_type: "P".to_string(),
            ..Default::default()
        }
    }

    fn raw(key: &str, status: &str) -> RawListing {
        serde_json::from_value(json!({"ULIKey": key, "SaleType": "P", "ListingStatus": status}))
            .unwrap()
    }

    #[test]
    fn status_change_is_not_a_removal() {
        let previous = vec![row("1", "A"), row("2", "A"), row("3", "A")];
        let today_rows = vec![row("1", "A")];
        // "2" went pending, "3" left the feed entirely.
        let today_raw = vec![raw("1", "A"), raw("2", "U")];

        let outcome = detect_removals(&previous, &today_rows, &today_raw);

        assert_eq!(outcome.candidates, 2);
        assert_eq!(outcome.removed, vec![row("3", "A")]);
    }

    #[test]
    fn keeps_last_known_attributes() {
        let mut gone = row("7", "A");
        gone.price = "250000".to_string();
        let outcome = detect_removals(&[gone.clone()], &[], &[]);
        assert_eq!(outcome.removed, vec![gone]);
    }

    #[test]
    fn inactive_previous_rows_are_ignored() {
        let previous = vec![row("1", "S")];
        let outcome = detect_removals(&previous, &[], &[]);
        assert_eq!(outcome, RemovalOutcome::default());
    }

    #[test]
    fn nothing_missing_means_no_candidates() {
        let previous = vec![row("1", "A")];
        let outcome = detect_removals(&previous, &[row("1", "A")], &[raw("1", "A")]);
        assert_eq!(outcome.candidates, 0);
        assert!(outcome.removed.is_empty());
    }
}
