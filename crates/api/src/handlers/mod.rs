//! HTTP request handlers, grouped by resource.
//!
//! Handlers stay thin: parse the request, call into [`crate::engine`], shape
//! the response. Domain failures propagate as [`crate::error::AppError`].

pub mod admin;
pub mod maintenance;
pub mod offers;
pub mod verification;
