//! Repository layer.
//!
//! Each repository is a zero-sized struct providing typed async operations
//! that accept `&dyn KvStore` as the first argument.

pub mod cooldown_repo;
pub mod history_repo;
pub mod otp_repo;
pub mod registry_repo;

pub use cooldown_repo::CooldownRepo;
pub use history_repo::HistoryRepo;
pub use otp_repo::OtpRepo;
pub use registry_repo::RegistryRepo;
