use axum::{
    Router,
    routing::{get, patch},
};

use super::controller::{
    check_admin, check_instructor, get_all_instructors, get_popular_instructors, get_students,
    make_admin, make_instructor, register_student,
};
use crate::state::AppState;

/// `/students` routes. The path segment after `admin/` and `instructor/`
/// is an email for GET and a user id for PATCH.
pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_students).post(register_student))
        .route("/admin/{id}", get(check_admin).patch(make_admin))
        .route(
            "/instructor/{id}",
            get(check_instructor).patch(make_instructor),
        )
}

pub fn init_instructors_router() -> Router<AppState> {
    Router::new()
        .route("/allinstructors", get(get_all_instructors))
        .route("/popular/instructors", get(get_popular_instructors))
}
