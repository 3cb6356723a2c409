use axum::{Router, routing::get};

use super::controller::get_news;
use crate::state::AppState;

pub fn init_news_router() -> Router<AppState> {
    Router::new().route("/news", get(get_news))
}
