use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use musicfairy_auth::{AuthError, Claims, verify_bearer};
use musicfairy_config::JwtConfig;

use crate::metrics::track_jwt_validation;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// The verified identity of the caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Rejects requests that name a different owner than the caller.
    pub fn ensure_owner(&self, email: Option<&str>) -> Result<(), AppError> {
        match email {
            Some(email) if email != self.email() => Err(AppError::forbidden(
                "forbidden access".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Verifies the `Authorization` header. An absent or non-UTF-8 header is
/// a malformed credential.
pub fn authenticate_header(headers: &HeaderMap, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::Malformed)?;

    let result = verify_bearer(value, jwt_config);
    track_jwt_validation(result.is_ok());
    result
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        authenticate_header(&parts.headers, &state.jwt_config)
            .map(AuthUser)
            .map_err(AuthError::into_app_error)
    }
}

/// Authentication gate: rejects the request with 401 unless it carries a
/// valid bearer token, otherwise stores the [`AuthUser`] in the request
/// extensions for the handler.
///
/// ```rust,ignore
/// let carts = init_carts_router()
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match authenticate_header(req.headers(), &state.jwt_config) {
        Ok(claims) => {
            req.extensions_mut().insert(AuthUser(claims));
            next.run(req).await
        }
        Err(err) => err.into_app_error().into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use musicfairy_auth::{IdentityClaims, issue_token};

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "middleware-test-secret-32-characters!!".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn auth_user(email: &str) -> AuthUser {
        AuthUser(Claims {
            email: email.to_string(),
            name: None,
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_authenticate_header_missing() {
        let headers = HeaderMap::new();
        assert_eq!(
            authenticate_header(&headers, &jwt_config()).unwrap_err(),
            AuthError::Malformed
        );
    }

    #[test]
    fn test_authenticate_header_valid() {
        let config = jwt_config();
        let token = issue_token(&IdentityClaims::new("a@x.com"), &config).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        let claims = authenticate_header(&headers, &config).unwrap();
        assert_eq!(claims.email, "a@x.com");
    }

    #[test]
    fn test_authenticate_header_without_bearer_prefix() {
        let config = jwt_config();
        let token = issue_token(&IdentityClaims::new("a@x.com"), &config).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&token).unwrap());
        assert_eq!(
            authenticate_header(&headers, &config).unwrap_err(),
            AuthError::Malformed
        );
    }

    #[test]
    fn test_ensure_owner() {
        let user = auth_user("a@x.com");
        assert!(user.ensure_owner(None).is_ok());
        assert!(user.ensure_owner(Some("a@x.com")).is_ok());
        assert_eq!(user.ensure_owner(Some("b@x.com")).unwrap_err().status, 403);
    }
}
