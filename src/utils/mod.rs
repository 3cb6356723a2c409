//! Shared helpers for the HTTP layer.
//!
//! - [`errors`]: [`AppError`](errors::AppError) and the shared error body
//! - [`ids`]: path id parsing

pub mod errors;
pub mod ids;
