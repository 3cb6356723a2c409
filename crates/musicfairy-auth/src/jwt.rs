//! JWT issue and verification.
//!
//! Tokens are signed with HS256 and validated with zero leeway, so a token
//! is rejected as soon as its `exp` has passed.
//!
//! # Example
//!
//! ```ignore
//! use musicfairy_auth::{IdentityClaims, issue_token, verify_bearer};
//!
//! let token = issue_token(&IdentityClaims::new("a@x.com"), &jwt_config)?;
//! let claims = verify_bearer(&format!("Bearer {token}"), &jwt_config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use musicfairy_config::JwtConfig;
use musicfairy_core::AppError;

use crate::claims::{Claims, IdentityClaims};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Credential absent, not a JWT, or not in `Bearer <token>` form.
    #[error("missing or malformed credential")]
    Malformed,
    #[error("invalid token signature")]
    Invalid,
    #[error("token has expired")]
    Expired,
    #[error("token claims must include a non-empty email")]
    EmptyClaims,
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl AuthError {
    /// HTTP rendering: verification failures are 401, a bad issue request
    /// is 400 and a signing failure is 500.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::EmptyClaims => AppError::bad_request(self),
            AuthError::Signing(_) => AppError::internal(self),
            AuthError::Malformed | AuthError::Invalid | AuthError::Expired => {
                AppError::unauthorized(self.to_string())
            }
        }
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

/// Signs a token for `identity`, valid for `access_token_expiry` seconds.
pub fn issue_token(identity: &IdentityClaims, jwt_config: &JwtConfig) -> Result<String, AuthError> {
    if identity.email.trim().is_empty() {
        return Err(AuthError::EmptyClaims);
    }

    let now = Utc::now().timestamp();
    let claims = Claims {
        email: identity.email.clone(),
        name: identity.name.clone(),
        exp: now + jwt_config.access_token_expiry,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::Signing(e.to_string()))
}

/// Checks signature and expiry of a bare token and returns its claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidSignature => AuthError::Invalid,
        _ => AuthError::Malformed,
    })?;

    // A signed token without an identity is unusable as a credential
    if data.claims.email.trim().is_empty() {
        return Err(AuthError::Malformed);
    }
    Ok(data.claims)
}

/// Extracts the token from an `Authorization` header value.
pub fn extract_bearer(header: &str) -> Result<&str, AuthError> {
    match header.strip_prefix(BEARER_PREFIX).map(str::trim) {
        Some(token) if !token.is_empty() && !token.contains(' ') => Ok(token),
        _ => Err(AuthError::Malformed),
    }
}

/// [`extract_bearer`] followed by [`verify_token`].
pub fn verify_bearer(header: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    verify_token(extract_bearer(header)?, jwt_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let config = get_test_jwt_config();
        let token = issue_token(&IdentityClaims::new("a@x.com"), &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_issue_rejects_empty_email() {
        let config = get_test_jwt_config();
        assert_eq!(
            issue_token(&IdentityClaims::new("  "), &config),
            Err(AuthError::EmptyClaims)
        );
    }

    #[test]
    fn test_expired_token() {
        let config = JwtConfig {
            access_token_expiry: -120,
            ..get_test_jwt_config()
        };
        let token = issue_token(&IdentityClaims::new("a@x.com"), &config).unwrap();
        assert_eq!(verify_token(&token, &config).unwrap_err(), AuthError::Expired);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let config = get_test_jwt_config();
        let token = issue_token(&IdentityClaims::new("a@x.com"), &config).unwrap();

        let other = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            ..get_test_jwt_config()
        };
        assert_eq!(verify_token(&token, &other).unwrap_err(), AuthError::Invalid);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let config = get_test_jwt_config();
        assert_eq!(
            verify_token("not-a-jwt", &config).unwrap_err(),
            AuthError::Malformed
        );
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer("abc.def.ghi"), Err(AuthError::Malformed));
        assert_eq!(extract_bearer("Basic dXNlcjpwYXNz"), Err(AuthError::Malformed));
        assert_eq!(extract_bearer("Bearer "), Err(AuthError::Malformed));
        assert_eq!(extract_bearer("Bearer a b"), Err(AuthError::Malformed));
    }

    #[test]
    fn test_verify_bearer() {
        let config = get_test_jwt_config();
        let token = issue_token(&IdentityClaims::new("c@x.com"), &config).unwrap();
        let claims = verify_bearer(&format!("Bearer {token}"), &config).unwrap();
        assert_eq!(claims.email, "c@x.com");
    }

    #[test]
    fn test_auth_error_status() {
        assert_eq!(AuthError::Expired.into_app_error().status, 401);
        assert_eq!(AuthError::Malformed.into_app_error().status, 401);
        assert_eq!(AuthError::EmptyClaims.into_app_error().status, 400);
    }
}
