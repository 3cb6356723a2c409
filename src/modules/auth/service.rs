use musicfairy_auth::{AuthError, IdentityClaims, issue_token};
use musicfairy_config::JwtConfig;
use tracing::instrument;

use super::model::{TokenRequest, TokenResponse};
use crate::metrics::track_jwt_issued;
use crate::utils::errors::AppError;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(jwt_config), fields(email = %request.email))]
    pub fn issue_token(
        jwt_config: &JwtConfig,
        request: TokenRequest,
    ) -> Result<TokenResponse, AppError> {
        let identity = IdentityClaims::from(request);
        let token = issue_token(&identity, jwt_config).map_err(AuthError::into_app_error)?;

        track_jwt_issued();
        Ok(TokenResponse { token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use musicfairy_auth::verify_token;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "service-test-secret-at-least-32-chars".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_issue_token_carries_identity() {
        let config = jwt_config();
        let response = AuthService::issue_token(
            &config,
            TokenRequest {
                email: "a@x.com".to_string(),
                name: Some("Ada".to_string()),
            },
        )
        .unwrap();

        let claims = verify_token(&response.token, &config).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_issue_token_rejects_blank_email() {
        let err = AuthService::issue_token(
            &jwt_config(),
            TokenRequest {
                email: "   ".to_string(),
                name: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.status, 400);
    }
}
