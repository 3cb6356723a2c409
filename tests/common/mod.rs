#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use musicfairy::router::init_router;
use musicfairy::state::AppState;
use musicfairy_auth::{IdentityClaims, issue_token};
use musicfairy_config::{CorsConfig, JwtConfig, PaymentConfig};
use musicfairy_db::bson::{Document, doc};
use musicfairy_db::{Collection, DocumentStore, MemoryStore};
use musicfairy_models::UserRole;
use musicfairy_payments::{PaymentError, PaymentGateway, PaymentIntent};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";

/// Payment processor double that records every call.
#[derive(Default)]
pub struct FakeGateway {
    pub calls: Mutex<Vec<(i64, String)>>,
    pub fail: bool,
}

impl FakeGateway {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(i64, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        self.calls
            .lock()
            .unwrap()
            .push((amount, currency.to_string()));

        if self.fail {
            return Err(PaymentError::Processor {
                status: 402,
                message: "card declined".to_string(),
            });
        }

        Ok(PaymentIntent {
            id: "pi_fake".to_string(),
            client_secret: format!("pi_fake_secret_{amount}"),
            amount,
            currency: currency.to_string(),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub gateway: Arc<FakeGateway>,
    pub jwt_config: JwtConfig,
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_gateway(FakeGateway::default())
}

pub fn setup_test_app_with_gateway(gateway: FakeGateway) -> TestApp {
    let store = MemoryStore::new();
    let gateway = Arc::new(gateway);
    let jwt_config = jwt_config();

    let state = AppState {
        store: Arc::new(store.clone()),
        payments: gateway.clone(),
        jwt_config: jwt_config.clone(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        payment_config: PaymentConfig::default(),
    };

    TestApp {
        router: init_router(state),
        store,
        gateway,
        jwt_config,
    }
}

impl TestApp {
    pub fn token_for(&self, email: &str) -> String {
        issue_token(&IdentityClaims::new(email), &self.jwt_config).unwrap()
    }

    /// Inserts a user directly into the store and returns its id.
    pub async fn create_user(&self, email: &str, role: Option<UserRole>) -> String {
        let mut user = doc! { "email": email, "name": "Test User" };
        if let Some(role) = role {
            user.insert("role", role.as_str());
        }
        self.store
            .insert_one(Collection::Students, user)
            .await
            .unwrap()
            .inserted_id
    }

    /// Inserts a user and returns a token for them.
    pub async fn login_as(&self, email: &str, role: Option<UserRole>) -> String {
        self.create_user(email, role).await;
        self.token_for(email)
    }

    pub async fn insert(&self, collection: Collection, document: Document) -> String {
        self.store
            .insert_one(collection, document)
            .await
            .unwrap()
            .inserted_id
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }
}
