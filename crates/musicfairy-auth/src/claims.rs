//! Identity claims embedded in access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a caller asks to be vouched for when requesting a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IdentityClaims {
    /// User's email address
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl IdentityClaims {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// JWT claims for access tokens.
///
/// Carries no role. Authorization reads the role from the user store on
/// every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User's email address
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    pub fn identity(&self) -> IdentityClaims {
        IdentityClaims {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}
