use axum::{Json, extract::State};
use tracing::instrument;

use super::model::NewsItem;
use super::service::NewsService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// List news items
#[utoipa::path(
    get,
    path = "/news",
    responses((status = 200, description = "News items", body = Vec<NewsItem>)),
    tag = "News"
)]
#[instrument(skip(state))]
pub async fn get_news(State(state): State<AppState>) -> Result<Json<Vec<NewsItem>>, AppError> {
    let news = NewsService::list_news(state.store.as_ref()).await?;
    Ok(Json(news))
}
