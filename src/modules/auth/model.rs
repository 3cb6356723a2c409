use musicfairy_auth::IdentityClaims;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

pub use musicfairy_models::TokenResponse;

/// Identity to mint a token for. The email must not be blank.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct TokenRequest {
    #[validate(length(max = 254))]
    pub email: String,
    #[validate(length(max = 100))]
    pub name: Option<String>,
}

impl From<TokenRequest> for IdentityClaims {
    fn from(request: TokenRequest) -> Self {
        let claims = IdentityClaims::new(request.email);
        match request.name {
            Some(name) => claims.with_name(name),
            None => claims,
        }
    }
}
