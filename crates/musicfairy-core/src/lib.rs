//! # Music Fairy Core
//!
//! Core types shared by every crate of the Music Fairy API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//!
//! # Example
//!
//! ```ignore
//! use musicfairy_core::AppError;
//!
//! let error = AppError::forbidden("Admin access required".to_string());
//! ```

pub mod errors;

pub use errors::AppError;
