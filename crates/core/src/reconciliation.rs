//! Admin reconciliation: filtering and status derivation over award history.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cooldown::CooldownPolicy;
use crate::error::CoreError;
use crate::history::{HistoryEntry, OfferStatus, StatusFilter};
use crate::types::Timestamp;

/// Filters for the admin offer listing. `None` fields do not filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferQuery {
    pub date: Option<NaiveDate>,
    pub contact: Option<String>,
    pub status: StatusFilter,
}

impl Default for OfferQuery {
    fn default() -> Self {
        Self {
            date: None,
            contact: None,
            status: StatusFilter::All,
        }
    }
}

impl OfferQuery {
    /// Build a query from raw query-string values. Blank values are ignored.
    pub fn from_raw(
        date: Option<&str>,
        contact: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, CoreError> {
        let date = match date.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                CoreError::InvalidInput(format!("Invalid date '{raw}'. Expected YYYY-MM-DD"))
            })?),
            None => None,
        };
        let contact = contact
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let status = match status {
            Some(raw) => StatusFilter::parse(raw.trim())?,
            None => StatusFilter::All,
        };
        Ok(Self {
            date,
            contact,
            status,
        })
    }
}

/// A history entry enriched with the fields the admin panel displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledOffer {
    #[serde(flatten)]
    pub entry: HistoryEntry,
    pub is_expired: bool,
    pub is_consumed: bool,
    pub status: OfferStatus,
    pub generated_at_formatted: String,
    pub display_id: String,
}

impl ReconciledOffer {
    pub fn new(entry: HistoryEntry, policy: &CooldownPolicy, now: Timestamp) -> Self {
        Self {
            is_expired: entry.is_expired(now),
            is_consumed: entry.consumed,
            status: entry.status(now),
            generated_at_formatted: policy.format_local(entry.timestamp),
            display_id: entry.display_id().to_string(),
            entry,
        }
    }
}

/// Filter `entries` by `query`, enrich them and sort newest first.
pub fn reconcile(
    entries: impl IntoIterator<Item = HistoryEntry>,
    query: &OfferQuery,
    policy: &CooldownPolicy,
    now: Timestamp,
) -> Vec<ReconciledOffer> {
    let mut offers: Vec<ReconciledOffer> = entries
        .into_iter()
        .filter(|e| query.date.is_none_or(|d| policy.local_date(e.timestamp) == d))
        .filter(|e| {
            query
                .contact
                .as_deref()
                .is_none_or(|needle| e.contact.to_lowercase().contains(needle))
        })
        .filter(|e| query.status.matches(e.status(now)))
        .map(|e| ReconciledOffer::new(e, policy, now))
        .collect();
    offers.sort_by(|a, b| b.entry.timestamp.cmp(&a.entry.timestamp));
    offers
}
