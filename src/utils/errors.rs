use serde::Serialize;
use utoipa::ToSchema;

pub use musicfairy_core::AppError;

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
