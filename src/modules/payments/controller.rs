use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use super::model::{
    CreatePaymentDto, EmailQuery, PaymentIntentRequest, PaymentIntentResponse, PaymentRecord,
    PaymentResult,
};
use super::service::PaymentService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorResponse};
use crate::validator::ValidatedJson;

/// Create a card payment intent with the processor
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Intent created", body = PaymentIntentResponse),
        (status = 400, description = "Missing, malformed or negative price", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 502, description = "Payment processor failure", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(request): ValidatedJson<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let response = PaymentService::create_payment_intent(
        state.payments.as_ref(),
        request.price,
        &state.payment_config.currency,
    )
    .await?;
    Ok(Json(response))
}

/// Record a completed payment and clear the settled cart items
#[utoipa::path(
    post,
    path = "/payments",
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResult),
        (status = 400, description = "Invalid cart item id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn record_payment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePaymentDto>,
) -> Result<(StatusCode, Json<PaymentResult>), AppError> {
    let result =
        PaymentService::record_payment(state.store.as_ref(), auth_user.email(), dto).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// List the caller's payments, newest first
#[utoipa::path(
    get,
    path = "/payments",
    params(EmailQuery),
    responses(
        (status = 200, description = "Payment history", body = Vec<PaymentRecord>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Email does not match the caller", body = ErrorResponse)
    ),
    tag = "Payments",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn get_payments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Vec<PaymentRecord>>, AppError> {
    auth_user.ensure_owner(query.email.as_deref())?;

    let payments = PaymentService::list_for_user(state.store.as_ref(), auth_user.email()).await?;
    Ok(Json(payments))
}
