//! # Music Fairy API
//!
//! REST backend for a music lesson marketplace, built with Rust, Axum and
//! MongoDB. It manages student and instructor accounts, class listings,
//! shopping carts, payments and news.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Authentication gate and role checks
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Token issuance
//! │   ├── students/    # Registration, roles, instructors
//! │   ├── classes/     # Listings and moderation
//! │   ├── carts/       # Per-user carts
//! │   ├── payments/    # Payment intents and history
//! │   ├── news/        # News items
//! │   └── health/      # Liveness and readiness
//! └── utils/           # Errors and id parsing
//! ```
//!
//! Each feature module follows the same structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Store operations
//! - `model.rs`: DTOs and constants
//! - `router.rs`: Axum router configuration
//!
//! ## Access Control
//!
//! Tokens identify a user by email and carry no role. Roles live on the
//! user record in the `students` collection and are read on every
//! authorization check:
//!
//! | Role | May |
//! |------|-----|
//! | (unset) / student | use carts and payments |
//! | instructor | additionally submit classes |
//! | admin | additionally moderate classes and grant roles |
//!
//! The first admin is created with the CLI:
//!
//! ```bash
//! cargo run --bin musicfairy-cli -- promote --email boss@example.com --role admin
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! MONGODB_URI=mongodb://localhost:27017
//! DB_NAME=musicFairyDB
//! JWT_SECRET=your-secure-secret-key
//! STRIPE_SECRET_KEY=sk_test_...
//! PORT=5000
//! ```
//!
//! When the server is running, API documentation is available at
//! `/swagger-ui` and `/scalar`.

pub mod db;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export workspace crates for convenience
pub use musicfairy_auth;
pub use musicfairy_config;
pub use musicfairy_core;
pub use musicfairy_db;
pub use musicfairy_models;
pub use musicfairy_payments;
