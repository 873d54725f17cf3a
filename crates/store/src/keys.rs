//! Key layout.
//!
//! ```text
//! otp:{contact}        pending verification code (TTL 600s)
//! cooldown:{contact}   last award instant, epoch millis (TTL until eligible)
//! history:{contact}    JSON array of history entries, at most 10
//! registry:contacts    JSON array of every contact that has been awarded
//! ```

pub const REGISTRY_KEY: &str = "registry:contacts";

pub fn otp(contact: &str) -> String {
    format!("otp:{contact}")
}

pub fn cooldown(contact: &str) -> String {
    format!("cooldown:{contact}")
}

pub fn history(contact: &str) -> String {
    format!("history:{contact}")
}
