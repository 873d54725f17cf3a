//! Stable identifiers for history entries.

use sha2::{Digest, Sha256};

use crate::types::Timestamp;

/// Number of trailing id characters shown to staff.
pub const DISPLAY_ID_LEN: usize = 12;

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Derive the unique id of an award from its contact, instant and offer.
pub fn entry_id(contact: &str, timestamp: Timestamp, offer_id: u32) -> String {
    let material = format!("{contact}:{}:{offer_id}", timestamp.timestamp_millis());
    sha256_hex(material.as_bytes())
}

/// The short form of an entry id printed on screen.
pub fn display_id(unique_id: &str) -> &str {
    let start = unique_id.len().saturating_sub(DISPLAY_ID_LEN);
    unique_id.get(start..).unwrap_or(unique_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn empty_input_produces_known_hash() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn entry_id_depends_on_every_part() {
        let t = Utc.with_ymd_and_hms(2025, 3, 10, 13, 5, 0).unwrap();
        let base = entry_id("a@b.com", t, 1);
        assert_eq!(base, entry_id("a@b.com", t, 1));
        assert_ne!(base, entry_id("a@c.com", t, 1));
        assert_ne!(base, entry_id("a@b.com", t + chrono::Duration::milliseconds(1), 1));
        assert_ne!(base, entry_id("a@b.com", t, 2));
        assert_eq!(base.len(), 64);
    }

    #[test]
    fn display_id_is_the_tail() {
        assert_eq!(display_id("0123456789abcdefXYZ"), "789abcdefXYZ");
        assert_eq!(display_id("short"), "short");
    }
}
