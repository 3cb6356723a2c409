use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::TokenRequest;
use crate::modules::health::model::HealthResponse;
use crate::utils::errors::ErrorResponse;
use musicfairy_models::{
    AddToCartDto, AdminStatusResponse, CartItem, ClassListing, ClassStatus, CreateClassDto,
    CreatePaymentDto, CreateUserDto, DeleteResponse, FeedbackDto, InsertResponse,
    InstructorStatusResponse, MessageResponse, NewsItem, PaymentIntentRequest,
    PaymentIntentResponse, PaymentRecord, PaymentResult, RegisterOutcome, TokenResponse,
    UpdateResponse, User, UserRole,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::banner,
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::issue_token,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::register_student,
        crate::modules::students::controller::make_instructor,
        crate::modules::students::controller::make_admin,
        crate::modules::students::controller::check_admin,
        crate::modules::students::controller::check_instructor,
        crate::modules::students::controller::get_all_instructors,
        crate::modules::students::controller::get_popular_instructors,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_approved_classes,
        crate::modules::classes::controller::get_popular_classes,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::approve_class,
        crate::modules::classes::controller::deny_class,
        crate::modules::classes::controller::give_feedback,
        crate::modules::carts::controller::get_cart,
        crate::modules::carts::controller::add_to_cart,
        crate::modules::carts::controller::remove_from_cart,
        crate::modules::payments::controller::create_payment_intent,
        crate::modules::payments::controller::record_payment,
        crate::modules::payments::controller::get_payments,
        crate::modules::news::controller::get_news,
    ),
    components(
        schemas(
            HealthResponse,
            TokenRequest,
            TokenResponse,
            User,
            UserRole,
            CreateUserDto,
            RegisterOutcome,
            AdminStatusResponse,
            InstructorStatusResponse,
            ClassListing,
            ClassStatus,
            CreateClassDto,
            FeedbackDto,
            CartItem,
            AddToCartDto,
            PaymentRecord,
            CreatePaymentDto,
            PaymentResult,
            PaymentIntentRequest,
            PaymentIntentResponse,
            NewsItem,
            InsertResponse,
            UpdateResponse,
            DeleteResponse,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Authentication", description = "Token issuance"),
        (name = "Students", description = "User registration, roles and instructors"),
        (name = "Classes", description = "Class listings and moderation"),
        (name = "Carts", description = "Per-user shopping carts"),
        (name = "Payments", description = "Payment intents and payment history"),
        (name = "News", description = "News items")
    ),
    info(
        title = "Music Fairy API",
        version = "0.1.0",
        description = "REST API for a music lesson marketplace built with Rust, Axum and MongoDB.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();

        for path in ["/jwt", "/students/admin/{id}", "/classes/feedback/{id}", "/payments"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
