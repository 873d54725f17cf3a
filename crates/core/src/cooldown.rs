//! Cooldown / eligibility arithmetic.
//!
//! A contact that was awarded at instant `t` becomes eligible again at the
//! same wall-clock time on the following calendar day, measured in a fixed
//! reference offset. The offset is configuration; UTC is the default.
//!
//! Everything here is pure: callers pass the award instant and "now".

use chrono::{Days, FixedOffset, NaiveDate, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Largest accepted reference offset, in minutes either side of UTC.
pub const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Snapshot of a contact's cooldown, shaped for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownInfo {
    pub next_eligible_at: Timestamp,
    pub remaining_ms: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_seconds: i64,
    pub display: String,
}

/// Cooldown rules anchored to a reference UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    offset: FixedOffset,
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self::utc()
    }
}

impl CooldownPolicy {
    pub fn utc() -> Self {
        Self {
            offset: FixedOffset::east_opt(0).expect("zero offset is valid"),
        }
    }

    /// Build a policy for a reference offset given in minutes east of UTC
    /// (e.g. `330` for UTC+05:30).
    pub fn with_offset_minutes(minutes: i32) -> Result<Self, CoreError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(CoreError::InvalidInput(format!(
                "UTC offset must be within +/-{MAX_OFFSET_MINUTES} minutes, got {minutes}"
            )));
        }
        let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
            CoreError::InvalidInput(format!("Invalid UTC offset: {minutes} minutes"))
        })?;
        Ok(Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Same wall-clock time on the next calendar day in the reference offset.
    pub fn next_eligible(&self, awarded_at: Timestamp) -> Timestamp {
        awarded_at
            .with_timezone(&self.offset)
            .checked_add_days(Days::new(1))
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or(awarded_at + chrono::Duration::days(1))
    }

    /// `true` when there is no prior award or `now` has reached the
    /// next-eligible instant.
    pub fn is_eligible(&self, awarded_at: Option<Timestamp>, now: Timestamp) -> bool {
        match awarded_at {
            None => true,
            Some(at) => now >= self.next_eligible(at),
        }
    }

    /// Remaining wait as seen at `now`. With no prior award the wait is zero.
    pub fn remaining(&self, awarded_at: Option<Timestamp>, now: Timestamp) -> CooldownInfo {
        let next = awarded_at.map_or(now, |at| self.next_eligible(at));
        let remaining_ms = (next - now).num_milliseconds().max(0);
        CooldownInfo::new(next, remaining_ms)
    }

    /// Store TTL for a cooldown marker written at `awarded_at`:
    /// `ceil((next_eligible - awarded_at) / 1s)`, at least one second.
    pub fn marker_ttl_secs(&self, awarded_at: Timestamp) -> u64 {
        let ms = (self.next_eligible(awarded_at) - awarded_at).num_milliseconds();
        let secs = (ms + 999).div_euclid(1000);
        secs.max(1) as u64
    }

    /// Calendar date of `instant` in the reference offset.
    pub fn local_date(&self, instant: Timestamp) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// `dd/mm/yyyy, hh:mm:ss AM` in the reference offset.
    pub fn format_local(&self, instant: Timestamp) -> String {
        instant
            .with_timezone(&self.offset)
            .format("%d/%m/%Y, %I:%M:%S %p")
            .to_string()
    }
}

impl CooldownInfo {
    pub fn new(next_eligible_at: Timestamp, remaining_ms: i64) -> Self {
        let total_seconds = remaining_ms.max(0) / 1000;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        Self {
            next_eligible_at,
            remaining_ms: remaining_ms.max(0),
            hours,
            minutes,
            seconds,
            total_seconds,
            display: format_remaining(hours, minutes, seconds),
        }
    }

    /// Whole hours left, rounded up.
    pub fn hours_left(&self) -> i64 {
        (self.remaining_ms + 3_599_999) / 3_600_000
    }
}

/// `"Xh Ym Zs"`, `"Ym Zs"` or `"Zs"`, dropping leading zero units.
pub fn format_remaining(hours: i64, minutes: i64, seconds: i64) -> String {
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
