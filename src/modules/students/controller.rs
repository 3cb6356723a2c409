use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use super::model::{
    AdminStatusResponse, CreateUserDto, InstructorStatusResponse, RegisterOutcome,
    UpdateResponse, User, UserRole,
};
use super::service::StudentService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// List every registered user
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    let users = StudentService::list_users(state.store.as_ref()).await?;
    Ok(Json(users))
}

/// Register a user
///
/// Registering an email that already exists is not an error: the response
/// is `{"message": "user already exists"}` and nothing is written.
#[utoipa::path(
    post,
    path = "/students",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = RegisterOutcome),
        (status = 200, description = "User already exists", body = RegisterOutcome),
        (status = 400, description = "Undecodable body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn register_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<RegisterOutcome>), AppError> {
    let outcome = StudentService::register(state.store.as_ref(), dto).await?;
    let status = match outcome {
        RegisterOutcome::Created(_) => StatusCode::CREATED,
        RegisterOutcome::AlreadyExists(_) => StatusCode::OK,
    };
    Ok((status, Json(outcome)))
}

/// Promote a user to instructor
#[utoipa::path(
    patch,
    path = "/students/instructor/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Update acknowledgment", body = UpdateResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn make_instructor(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>, AppError> {
    let result = StudentService::set_role(state.store.as_ref(), &id, UserRole::Instructor).await?;
    Ok(Json(result))
}

/// Promote a user to admin
#[utoipa::path(
    patch,
    path = "/students/admin/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Update acknowledgment", body = UpdateResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn make_admin(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>, AppError> {
    let result = StudentService::set_role(state.store.as_ref(), &id, UserRole::Admin).await?;
    Ok(Json(result))
}

/// Check whether the caller is an admin
///
/// Asking about any email other than the caller's own answers `false`
/// without a lookup.
#[utoipa::path(
    get,
    path = "/students/admin/{id}",
    params(("id" = String, Path, description = "Email to check")),
    responses(
        (status = 200, description = "Admin status", body = AdminStatusResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn check_admin(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<AdminStatusResponse>, AppError> {
    if email != auth_user.email() {
        return Ok(Json(AdminStatusResponse { admin: false }));
    }

    let admin = StudentService::has_role(state.store.as_ref(), &email, UserRole::Admin).await?;
    Ok(Json(AdminStatusResponse { admin }))
}

/// Check whether the caller is an instructor
#[utoipa::path(
    get,
    path = "/students/instructor/{id}",
    params(("id" = String, Path, description = "Email to check")),
    responses(
        (status = 200, description = "Instructor status", body = InstructorStatusResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn check_instructor(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<InstructorStatusResponse>, AppError> {
    if email != auth_user.email() {
        return Ok(Json(InstructorStatusResponse { instructor: false }));
    }

    let instructor =
        StudentService::has_role(state.store.as_ref(), &email, UserRole::Instructor).await?;
    Ok(Json(InstructorStatusResponse { instructor }))
}

/// List every instructor
#[utoipa::path(
    get,
    path = "/allinstructors",
    responses((status = 200, description = "Instructors", body = Vec<User>)),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_all_instructors(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, AppError> {
    let instructors = StudentService::list_instructors(state.store.as_ref(), None).await?;
    Ok(Json(instructors))
}

/// Up to six instructors for the landing page
#[utoipa::path(
    get,
    path = "/popular/instructors",
    responses((status = 200, description = "Popular instructors", body = Vec<User>)),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_popular_instructors(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, AppError> {
    let instructors = StudentService::popular_instructors(state.store.as_ref()).await?;
    Ok(Json(instructors))
}
