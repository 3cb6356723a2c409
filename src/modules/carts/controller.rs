use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use super::model::{AddToCartDto, CartItem, DeleteResponse, EmailQuery, InsertResponse};
use super::service::CartService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// List the caller's cart
#[utoipa::path(
    get,
    path = "/carts",
    params(EmailQuery),
    responses(
        (status = 200, description = "Cart items", body = Vec<CartItem>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Email does not match the caller", body = ErrorResponse)
    ),
    tag = "Carts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<CartItem>>, AppError> {
    auth_user.ensure_owner(query.email.as_deref())?;

    let items = CartService::list_for_user(state.store.as_ref(), auth_user.email()).await?;
    Ok(Json(items))
}

/// Add a class to the caller's cart
#[utoipa::path(
    post,
    path = "/carts",
    request_body = AddToCartDto,
    responses(
        (status = 201, description = "Item added", body = InsertResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Carts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<AddToCartDto>,
) -> Result<(StatusCode, Json<InsertResponse>), AppError> {
    let result = CartService::add_item(state.store.as_ref(), auth_user.email(), dto).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Remove an item from the caller's cart
#[utoipa::path(
    delete,
    path = "/carts/{id}",
    params(("id" = String, Path, description = "Cart item ID")),
    responses(
        (status = 200, description = "Delete acknowledgment", body = DeleteResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Carts",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let result = CartService::remove_item(state.store.as_ref(), auth_user.email(), &id).await?;
    Ok(Json(result))
}
