use axum::{
    Router,
    routing::{get, patch},
};

use super::controller::{
    approve_class, create_class, deny_class, get_approved_classes, get_classes,
    get_popular_classes, give_feedback,
};
use crate::state::AppState;

/// Public listings and class submission.
pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/classes", get(get_classes).post(create_class))
        .route("/classes/approved", get(get_approved_classes))
        .route("/popular/classes/approved", get(get_popular_classes))
}

/// Moderation routes; the caller mounts them behind the admin gate.
pub fn init_moderation_router() -> Router<AppState> {
    Router::new()
        .route("/classes/approved/{id}", patch(approve_class))
        .route("/classes/denied/{id}", patch(deny_class))
        .route("/classes/feedback/{id}", patch(give_feedback))
}
