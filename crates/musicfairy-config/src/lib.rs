//! # Music Fairy Config
//!
//! Configuration types for the Music Fairy API, loaded from environment
//! variables (a `.env` file is honoured by the binaries through `dotenvy`).
//!
//! - [`jwt`]: Token signing secret and lifetime
//! - [`cors`]: Allowed browser origins
//! - [`database`]: Document store backend and connection string
//! - [`payment`]: Payment processor credentials
//! - [`server`]: Listen addresses
//!
//! # Example
//!
//! ```ignore
//! use musicfairy_config::{DatabaseConfig, JwtConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let database_config = DatabaseConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod payment;
pub mod server;

pub use cors::CorsConfig;
pub use database::{DatabaseConfig, StoreBackend};
pub use jwt::JwtConfig;
pub use payment::PaymentConfig;
pub use server::ServerConfig;
