//! Middleware and extractors guarding the API.
//!
//! # Modules
//!
//! - [`auth`]: bearer token authentication ([`auth::AuthUser`], [`auth::require_auth`])
//! - [`role`]: role checks against the user store ([`role::require_admin`],
//!   [`role::RequireAdmin`], [`role::RequireInstructor`])
//!
//! # Request Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The authentication gate verifies the token and stores the claims in
//!    the request extensions (401 on failure)
//! 3. Where required, the authorization gate looks up the caller's role
//!    (403 when it is not allowed)
//! 4. The handler runs

pub mod auth;
pub mod role;
