//! Role-based authorization for Axum.
//!
//! Roles are not carried in tokens. Every check reads the caller's current
//! role from the `students` collection, so an unknown user or a user
//! without a role is denied.
//!
//! Two ways to apply a check:
//! 1. Layer-based middleware ([`require_admin`]) for whole route groups
//! 2. Extractors ([`RequireAdmin`], [`RequireInstructor`]) for single handlers

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use musicfairy_db::{Collection, DocumentStore, Filter};
use musicfairy_models::UserRole;

use crate::metrics::track_authorization_check;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];
pub const INSTRUCTOR_OR_ADMIN: &[UserRole] = &[UserRole::Instructor, UserRole::Admin];

/// Current role of the user registered under `email`, if any.
pub async fn lookup_role(
    store: &dyn DocumentStore,
    email: &str,
) -> Result<Option<UserRole>, AppError> {
    let user = store
        .find_one(Collection::Students, Filter::all().eq("email", email))
        .await?;

    Ok(user
        .as_ref()
        .and_then(|doc| doc.get_str("role").ok())
        .and_then(|role| role.parse().ok()))
}

/// Fails with 403 unless `role` is one of `allowed`.
pub fn ensure_role(role: Option<UserRole>, allowed: &[UserRole]) -> Result<UserRole, AppError> {
    match role {
        Some(role) if allowed.contains(&role) => Ok(role),
        _ => Err(AppError::forbidden("forbidden access".to_string())),
    }
}

/// Looks up the caller's role and checks it against `allowed`.
pub async fn authorize(
    state: &AppState,
    auth_user: &AuthUser,
    allowed: &[UserRole],
) -> Result<UserRole, AppError> {
    let role = lookup_role(state.store.as_ref(), auth_user.email()).await?;
    let result = ensure_role(role, allowed);

    track_authorization_check(
        result.is_ok(),
        role.map(UserRole::as_str).unwrap_or("none"),
    );
    if result.is_err() {
        tracing::warn!(
            email = %auth_user.email(),
            role = ?role,
            required = ?allowed,
            "Authorization denied"
        );
    }
    result
}

/// Middleware that authenticates the caller and checks their role.
///
/// ```rust,ignore
/// let moderation = Router::new()
///     .route("/classes/approved/{id}", patch(approve_class))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    authorize(&state, &auth_user, allowed_roles).await?;

    parts.extensions.insert(auth_user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Admin-only route group gate.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, ADMIN_ONLY).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Extractor for admin-only handlers.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        authorize(state, &auth_user, ADMIN_ONLY).await?;
        Ok(RequireAdmin(auth_user))
    }
}

/// Extractor for handlers open to instructors and admins.
#[derive(Debug, Clone)]
pub struct RequireInstructor(pub AuthUser);

impl FromRequestParts<AppState> for RequireInstructor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        authorize(state, &auth_user, INSTRUCTOR_OR_ADMIN).await?;
        Ok(RequireInstructor(auth_user))
    }
}
