//! # Music Fairy CLI
//!
//! Administrative operations run directly against the document store,
//! used by the `musicfairy-cli` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use musicfairy_cli::{admin::promote_user, seeder::seed_news};
//! use musicfairy_models::UserRole;
//!
//! promote_user(&store, "owner@example.com", UserRole::Admin).await?;
//! seed_news(&store, 10).await?;
//! ```

pub mod admin;
pub mod seeder;
