//! Per-contact award history and the admin-facing status derived from it.

use serde::{Deserialize, Serialize};

use crate::catalog::Offer;
use crate::error::CoreError;
use crate::hashing;
use crate::types::Timestamp;

/// Maximum number of entries kept per contact. Oldest entries go first.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// One awarded offer, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub offer: Offer,
    pub contact: String,
    pub timestamp: Timestamp,
    pub next_eligible_at: Timestamp,
    #[serde(default)]
    pub consumed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed_at: Option<Timestamp>,
    pub unique_id: String,
}

impl HistoryEntry {
    /// A fresh, unconsumed entry for `offer` awarded to `contact` at `timestamp`.
    pub fn new(offer: Offer, contact: &str, timestamp: Timestamp, next_eligible_at: Timestamp) -> Self {
        let unique_id = hashing::entry_id(contact, timestamp, offer.id);
        Self {
            offer,
            contact: contact.to_string(),
            timestamp,
            next_eligible_at,
            consumed: false,
            consumed_by: None,
            consumed_at: None,
            unique_id,
        }
    }

    pub fn display_id(&self) -> &str {
        hashing::display_id(&self.unique_id)
    }

    /// The cooldown this entry started is over.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.next_eligible_at
    }

    /// Set or clear the consumed flag along with who/when metadata.
    pub fn set_consumed(&mut self, consumed: bool, staff: Option<&str>, now: Timestamp) {
        self.consumed = consumed;
        if consumed {
            self.consumed_by = staff.map(str::to_string);
            self.consumed_at = Some(now);
        } else {
            self.consumed_by = None;
            self.consumed_at = None;
        }
    }

    /// consumed > expired > active.
    pub fn status(&self, now: Timestamp) -> OfferStatus {
        if self.consumed {
            OfferStatus::Consumed
        } else if self.is_expired(now) {
            OfferStatus::Expired
        } else {
            OfferStatus::Active
        }
    }
}

/// Append `entry`, evicting from the front so at most
/// [`MAX_HISTORY_ENTRIES`] remain. Returns the number of evicted entries.
pub fn push_bounded(history: &mut Vec<HistoryEntry>, entry: HistoryEntry) -> usize {
    history.push(entry);
    let overflow = history.len().saturating_sub(MAX_HISTORY_ENTRIES);
    history.drain(..overflow);
    overflow
}

/// Display status of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Active,
    Expired,
    Consumed,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Active => "active",
            OfferStatus::Expired => "expired",
            OfferStatus::Consumed => "consumed",
        }
    }
}

/// Status filter accepted by the admin listing. `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(OfferStatus),
}

impl StatusFilter {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "all" | "" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Only(OfferStatus::Active)),
            "expired" => Ok(StatusFilter::Only(OfferStatus::Expired)),
            "consumed" => Ok(StatusFilter::Only(OfferStatus::Consumed)),
            other => Err(CoreError::InvalidInput(format!(
                "Unknown status '{other}'. Expected one of: active, expired, consumed, all"
            ))),
        }
    }

    pub fn matches(&self, status: OfferStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use chrono::{TimeZone, Utc};

    fn entry_at(minute: u32) -> HistoryEntry {
        let offer = Catalog::default().find(1).unwrap().clone();
        let t = Utc.with_ymd_and_hms(2025, 3, 10, 13, minute, 0).unwrap();
        HistoryEntry::new(offer, "a@b.com", t, t + chrono::Duration::days(1))
    }

    #[test]
    fn eleventh_entry_evicts_the_oldest() {
        let mut history: Vec<HistoryEntry> = (0..10).map(entry_at).collect();
        let oldest = history[0].unique_id.clone();

        let evicted = push_bounded(&mut history, entry_at(10));

        assert_eq!(evicted, 1);
        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        assert!(history.iter().all(|e| e.unique_id != oldest));
        assert_eq!(history.last().unwrap().timestamp.format("%M").to_string(), "10");
    }

    #[test]
    fn push_below_limit_keeps_everything() {
        let mut history = vec![entry_at(0)];
        assert_eq!(push_bounded(&mut history, entry_at(1)), 0);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn status_precedence() {
        let mut entry = entry_at(0);
        let before = entry.timestamp + chrono::Duration::hours(1);
        let after = entry.next_eligible_at;

        assert_eq!(entry.status(before), OfferStatus::Active);
        assert_eq!(entry.status(after), OfferStatus::Expired);

        entry.set_consumed(true, Some("sam"), before);
        assert_eq!(entry.status(before), OfferStatus::Consumed);
        assert_eq!(entry.status(after), OfferStatus::Consumed);
        assert_eq!(entry.consumed_by.as_deref(), Some("sam"));
        assert_eq!(entry.consumed_at, Some(before));
    }

    #[test]
    fn unconsume_clears_metadata() {
        let mut entry = entry_at(0);
        entry.set_consumed(true, Some("sam"), entry.timestamp);
        entry.set_consumed(false, Some("sam"), entry.timestamp);
        assert!(!entry.consumed);
        assert!(entry.consumed_by.is_none());
        assert!(entry.consumed_at.is_none());
    }

    #[test]
    fn serializes_offer_fields_inline() {
        let entry = entry_at(5);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["category"], "win");
        assert_eq!(json["consumed"], false);
        assert!(json.get("consumedBy").is_none());

        let back: HistoryEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn status_filter_parsing() {
        assert_eq!(StatusFilter::parse("all").unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse("consumed").unwrap(),
            StatusFilter::Only(OfferStatus::Consumed)
        );
        assert!(StatusFilter::parse("pending").is_err());
        assert!(StatusFilter::Only(OfferStatus::Active).matches(OfferStatus::Active));
        assert!(!StatusFilter::Only(OfferStatus::Active).matches(OfferStatus::Expired));
    }
}
