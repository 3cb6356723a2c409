//! # Music Fairy Auth
//!
//! Credential handling for the Music Fairy API.
//!
//! - [`claims`]: the identity carried inside a token
//! - [`jwt`]: issuing, verifying and unwrapping `Bearer` credentials
//!
//! Tokens are HS256 JWTs signed with the server secret from
//! [`JwtConfig`](musicfairy_config::JwtConfig) and expire after
//! `access_token_expiry` seconds (one hour by default).
//!
//! # Example
//!
//! ```ignore
//! use musicfairy_auth::{IdentityClaims, issue_token, verify_token};
//! use musicfairy_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = issue_token(&IdentityClaims::new("a@x.com"), &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.email, "a@x.com");
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, IdentityClaims};
pub use jwt::{AuthError, extract_bearer, issue_token, verify_bearer, verify_token};
