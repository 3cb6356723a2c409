mod common;

use axum::http::StatusCode;
use common::{FakeGateway, TestApp, setup_test_app, setup_test_app_with_gateway};
use musicfairy_db::Collection;
use musicfairy_db::bson::{doc, oid::ObjectId};
use serde_json::{Value, json};

async fn add_cart_item(app: &TestApp, email: &str) -> String {
    app.insert(
        Collection::Carts,
        doc! {
            "class_id": ObjectId::new().to_hex(),
            "user_email": email,
            "price": 20.0
        },
    )
    .await
}

fn payment_body(cart_item_ids: &[&str]) -> Value {
    json!({
        "price": 40.0,
        "transaction_id": "pi_3Nx",
        "cart_item_ids": cart_item_ids,
        "class_ids": []
    })
}

#[tokio::test]
async fn test_create_payment_intent() {
    let app = setup_test_app();
    let token = app.token_for("buyer@x.com");

    let (status, body) = app
        .post("/create-payment-intent", Some(&token), json!({ "price": 19.99 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["client_secret"], "pi_fake_secret_1999");
    assert_eq!(app.gateway.calls(), vec![(1999, "usd".to_string())]);
}

#[tokio::test]
async fn test_create_payment_intent_truncates_sub_cent() {
    let app = setup_test_app();
    let token = app.token_for("buyer@x.com");

    let (status, _) = app
        .post("/create-payment-intent", Some(&token), json!({ "price": 0.015 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.gateway.calls(), vec![(1, "usd".to_string())]);
}

#[tokio::test]
async fn test_create_payment_intent_negative_price() {
    let app = setup_test_app();
    let token = app.token_for("buyer@x.com");

    let (status, _) = app
        .post("/create-payment-intent", Some(&token), json!({ "price": -1.0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_create_payment_intent_missing_price() {
    let app = setup_test_app();
    let token = app.token_for("buyer@x.com");

    let (status, body) = app
        .post("/create-payment-intent", Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "price is required");
    assert!(app.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_create_payment_intent_non_numeric_price() {
    let app = setup_test_app();
    let token = app.token_for("buyer@x.com");

    let (status, body) = app
        .post("/create-payment-intent", Some(&token), json!({ "price": "ten" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid field type in request");
}

#[tokio::test]
async fn test_create_payment_intent_processor_failure() {
    let app = setup_test_app_with_gateway(FakeGateway::failing());
    let token = app.token_for("buyer@x.com");

    let (status, body) = app
        .post("/create-payment-intent", Some(&token), json!({ "price": 10.0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("card declined"));
}

#[tokio::test]
async fn test_create_payment_intent_requires_auth() {
    let app = setup_test_app();

    let (status, _) = app
        .post("/create-payment-intent", None, json!({ "price": 10.0 }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.gateway.calls().is_empty());
}

#[tokio::test]
async fn test_record_payment_clears_only_referenced_items() {
    let app = setup_test_app();
    let token = app.token_for("buyer@x.com");
    let paid_a = add_cart_item(&app, "buyer@x.com").await;
    let paid_b = add_cart_item(&app, "buyer@x.com").await;
    let unpaid = add_cart_item(&app, "buyer@x.com").await;
    let foreign = add_cart_item(&app, "other@x.com").await;

    let (status, body) = app
        .post(
            "/payments",
            Some(&token),
            payment_body(&[paid_a.as_str(), paid_b.as_str(), foreign.as_str()]),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["insert_result"]["acknowledged"], true);
    assert_eq!(body["delete_result"]["deleted_count"], 2);

    let (_, cart) = app.get("/carts", Some(&token)).await;
    let cart = cart.as_array().unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["_id"], unpaid.as_str());

    let other = app.token_for("other@x.com");
    let (_, other_cart) = app.get("/carts", Some(&other)).await;
    assert_eq!(other_cart[0]["_id"], foreign.as_str());
}

#[tokio::test]
async fn test_record_payment_stamps_email_and_date() {
    let app = setup_test_app();
    let token = app.token_for("buyer@x.com");
    let item = add_cart_item(&app, "buyer@x.com").await;

    let mut body = payment_body(&[item.as_str()]);
    body["email"] = json!("spoof@x.com");
    let (status, _) = app.post("/payments", Some(&token), body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, payments) = app.get("/payments", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments[0]["email"], "buyer@x.com");
    assert_eq!(payments[0]["transaction_id"], "pi_3Nx");
    assert!(!payments[0]["date"].as_str().unwrap().is_empty());
    assert_eq!(payments[0]["cart_item_ids"], json!([item]));
}

#[tokio::test]
async fn test_record_payment_with_invalid_cart_id() {
    let app = setup_test_app();
    let token = app.token_for("buyer@x.com");

    let (status, _) = app
        .post("/payments", Some(&token), payment_body(&["bogus"]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty(Collection::Payments));
}

#[tokio::test]
async fn test_record_payment_without_cart_items() {
    let app = setup_test_app();
    let token = app.token_for("buyer@x.com");

    let (status, _) = app.post("/payments", Some(&token), payment_body(&[])).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_payment_history_newest_first() {
    let app = setup_test_app();
    let token = app.token_for("buyer@x.com");
    for (date, tx) in [
        ("2024-02-01T10:00:00+00:00", "pi_feb"),
        ("2024-04-01T10:00:00+00:00", "pi_apr"),
        ("2024-03-01T10:00:00+00:00", "pi_mar"),
    ] {
        app.insert(
            Collection::Payments,
            doc! { "email": "buyer@x.com", "price": 10.0, "transaction_id": tx, "date": date },
        )
        .await;
    }
    app.insert(
        Collection::Payments,
        doc! { "email": "other@x.com", "price": 10.0, "transaction_id": "pi_other", "date": "2024-05-01T10:00:00+00:00" },
    )
    .await;

    let (status, body) = app.get("/payments?email=buyer@x.com", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let txs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["transaction_id"].as_str().unwrap())
        .collect();
    assert_eq!(txs, vec!["pi_apr", "pi_mar", "pi_feb"]);
}

#[tokio::test]
async fn test_payment_history_for_other_email_is_forbidden() {
    let app = setup_test_app();
    let token = app.token_for("buyer@x.com");

    let (status, _) = app.get("/payments?email=other@x.com", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
