//! Maintenance sweep constants and pure helpers.

use serde::Serialize;

use crate::history::HistoryEntry;
use crate::types::Timestamp;

/// History entries older than this are dropped by the sweep.
pub const DEFAULT_HISTORY_RETENTION_DAYS: i64 = 7;

/// Counters reported by one sweep run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepStats {
    pub cleaned_offers: u64,
    pub cleaned_cooldowns: u64,
    pub expired_keys: u64,
    pub cleaned_contacts: u64,
    pub cleanup_time: Timestamp,
}

impl SweepStats {
    pub fn started_at(now: Timestamp) -> Self {
        Self {
            cleanup_time: now,
            ..Default::default()
        }
    }
}

/// Remove entries stamped before `cutoff`. Returns how many were removed.
pub fn prune_older_than(history: &mut Vec<HistoryEntry>, cutoff: Timestamp) -> u64 {
    let before = history.len();
    history.retain(|e| e.timestamp >= cutoff);
    (before - history.len()) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use chrono::{TimeZone, Utc};

    #[test]
    fn prune_keeps_recent_entries() {
        let offer = Catalog::default().find(6).unwrap().clone();
        let mk = |day| {
            let t = Utc.with_ymd_and_hms(2025, 3, day, 0, 0, 0).unwrap();
            HistoryEntry::new(offer.clone(), "a@b.com", t, t + chrono::Duration::days(1))
        };
        let mut history = vec![mk(1), mk(5), mk(9)];
        let cutoff = Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap();

        assert_eq!(prune_older_than(&mut history, cutoff), 1);
        assert_eq!(history.len(), 2);
    }
}
