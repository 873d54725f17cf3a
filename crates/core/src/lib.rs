//! Domain logic for the spin-to-win offer service.
//!
//! This crate has no internal dependencies and performs no I/O: contact
//! validation, verification codes, cooldown arithmetic, the offer catalog
//! and weighted draw, award history and admin reconciliation all live here
//! as plain functions and types.

pub mod catalog;
pub mod clock;
pub mod contact;
pub mod cooldown;
pub mod error;
pub mod hashing;
pub mod history;
pub mod maintenance;
pub mod otp;
pub mod random;
pub mod reconciliation;
pub mod selector;
pub mod types;
