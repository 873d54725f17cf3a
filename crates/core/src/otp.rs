//! One-time verification code constants and generation.

use crate::random::RandomSource;

/// Lifetime of a stored verification code.
pub const OTP_TTL_SECS: u64 = 600;

/// Number of digits in a verification code.
pub const OTP_LENGTH: usize = 6;

const OTP_MIN: u32 = 100_000;
const OTP_SPAN: u32 = 900_000;

/// Draw a code uniformly from `[100000, 999999]`.
pub fn generate_code(rng: &dyn RandomSource) -> String {
    let offset = (rng.next_unit() * f64::from(OTP_SPAN)).floor() as u32;
    (OTP_MIN + offset.min(OTP_SPAN - 1)).to_string()
}

/// Whether `code` has the shape of a verification code (six ASCII digits).
pub fn is_well_formed(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}
