use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use super::model::{
    ClassListing, ClassQuery, ClassStatus, CreateClassDto, FeedbackDto, InsertResponse,
    UpdateResponse,
};
use super::service::ClassService;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireInstructor;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// List classes, optionally only those of one instructor
#[utoipa::path(
    get,
    path = "/classes",
    params(ClassQuery),
    responses((status = 200, description = "Class listings", body = Vec<ClassListing>)),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes(
    State(state): State<AppState>,
    Query(query): Query<ClassQuery>,
) -> Result<Json<Vec<ClassListing>>, AppError> {
    let classes = ClassService::list_classes(state.store.as_ref(), query).await?;
    Ok(Json(classes))
}

/// List approved classes
#[utoipa::path(
    get,
    path = "/classes/approved",
    responses((status = 200, description = "Approved classes", body = Vec<ClassListing>)),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_approved_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassListing>>, AppError> {
    let classes = ClassService::list_approved(state.store.as_ref()).await?;
    Ok(Json(classes))
}

/// Up to six approved classes, most enrolled first
#[utoipa::path(
    get,
    path = "/popular/classes/approved",
    responses((status = 200, description = "Popular approved classes", body = Vec<ClassListing>)),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_popular_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassListing>>, AppError> {
    let classes = ClassService::popular_approved(state.store.as_ref()).await?;
    Ok(Json(classes))
}

/// Submit a class for review
///
/// The listing is owned by the caller and always starts `pending`.
#[utoipa::path(
    post,
    path = "/classes",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created", body = InsertResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - instructor or admin only", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, instructor, dto))]
pub async fn create_class(
    State(state): State<AppState>,
    RequireInstructor(instructor): RequireInstructor,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, Json<InsertResponse>), AppError> {
    let result = ClassService::create_class(
        state.store.as_ref(),
        instructor.email(),
        instructor.name(),
        dto,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Approve a class
#[utoipa::path(
    patch,
    path = "/classes/approved/{id}",
    params(("id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Update acknowledgment", body = UpdateResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn approve_class(
    State(state): State<AppState>,
    _admin: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>, AppError> {
    let result = ClassService::set_status(state.store.as_ref(), &id, ClassStatus::Approved).await?;
    Ok(Json(result))
}

/// Deny a class
#[utoipa::path(
    patch,
    path = "/classes/denied/{id}",
    params(("id" = String, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Update acknowledgment", body = UpdateResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin))]
pub async fn deny_class(
    State(state): State<AppState>,
    _admin: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>, AppError> {
    let result = ClassService::set_status(state.store.as_ref(), &id, ClassStatus::Denied).await?;
    Ok(Json(result))
}

/// Leave feedback on a class
///
/// Creates a pending listing holding only the feedback when the id is
/// unknown.
#[utoipa::path(
    patch,
    path = "/classes/feedback/{id}",
    params(("id" = String, Path, description = "Class ID")),
    request_body = FeedbackDto,
    responses(
        (status = 200, description = "Update acknowledgment", body = UpdateResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _admin, dto))]
pub async fn give_feedback(
    State(state): State<AppState>,
    _admin: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<FeedbackDto>,
) -> Result<Json<UpdateResponse>, AppError> {
    let result = ClassService::set_feedback(state.store.as_ref(), &id, dto.feedback).await?;
    Ok(Json(result))
}
