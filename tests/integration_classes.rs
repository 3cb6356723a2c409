mod common;

use axum::http::StatusCode;
use common::{TestApp, setup_test_app};
use musicfairy_db::Collection;
use musicfairy_db::bson::{doc, oid::ObjectId};
use musicfairy_models::UserRole;
use serde_json::{Value, json};

fn class_body(title: &str) -> Value {
    json!({
        "title": title,
        "available_seats": 12,
        "price": 35.5
    })
}

async fn create_class(app: &TestApp, token: &str, title: &str) -> String {
    let (status, body) = app.post("/classes", Some(token), class_body(title)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["inserted_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_instructor_creates_pending_class() {
    let app = setup_test_app();
    let instructor = app.login_as("teach@x.com", Some(UserRole::Instructor)).await;

    create_class(&app, &instructor, "Jazz Piano").await;

    let (status, body) = app.get("/classes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Jazz Piano");
    assert_eq!(body[0]["status"], "pending");
    assert_eq!(body[0]["instructor_email"], "teach@x.com");
    assert_eq!(body[0]["enrolled"], 0);
}

#[tokio::test]
async fn test_client_cannot_force_status() {
    let app = setup_test_app();
    let instructor = app.login_as("teach@x.com", Some(UserRole::Instructor)).await;

    let mut body = class_body("Sneaky");
    body["status"] = json!("approved");
    let (status, _) = app.post("/classes", Some(&instructor), body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, approved) = app.get("/classes/approved", None).await;
    assert!(approved.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_student_cannot_create_class() {
    let app = setup_test_app();
    let student = app.login_as("s@x.com", Some(UserRole::Student)).await;

    let (status, _) = app.post("/classes", Some(&student), class_body("Nope")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.post("/classes", None, class_body("Nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.store.is_empty(Collection::Classes));
}

#[tokio::test]
async fn test_create_class_negative_price() {
    let app = setup_test_app();
    let admin = app.login_as("boss@x.com", Some(UserRole::Admin)).await;

    let mut body = class_body("Cheap");
    body["price"] = json!(-3.0);
    let (status, _) = app.post("/classes", Some(&admin), body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_moderation_flow() {
    let app = setup_test_app();
    let instructor = app.login_as("teach@x.com", Some(UserRole::Instructor)).await;
    let admin = app.login_as("boss@x.com", Some(UserRole::Admin)).await;

    let approved_id = create_class(&app, &instructor, "Violin").await;
    let denied_id = create_class(&app, &instructor, "Kazoo").await;

    let (status, body) = app
        .patch(&format!("/classes/approved/{approved_id}"), Some(&admin), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modified_count"], 1);

    let (status, _) = app
        .patch(&format!("/classes/denied/{denied_id}"), Some(&admin), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, approved) = app.get("/classes/approved", None).await;
    assert_eq!(approved.as_array().unwrap().len(), 1);
    assert_eq!(approved[0]["title"], "Violin");

    let (_, all) = app.get("/classes?instructor_email=teach@x.com", None).await;
    let kazoo = all
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["title"] == "Kazoo")
        .unwrap();
    assert_eq!(kazoo["status"], "denied");
}

#[tokio::test]
async fn test_feedback_on_existing_class() {
    let app = setup_test_app();
    let instructor = app.login_as("teach@x.com", Some(UserRole::Instructor)).await;
    let admin = app.login_as("boss@x.com", Some(UserRole::Admin)).await;
    let id = create_class(&app, &instructor, "Cello").await;

    let (status, body) = app
        .patch(
            &format!("/classes/feedback/{id}"),
            Some(&admin),
            json!({ "feedback": "Please add a syllabus" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matched_count"], 1);
    assert!(body["upserted_id"].is_null());

    let (_, classes) = app.get("/classes", None).await;
    assert_eq!(classes[0]["feedback"], "Please add a syllabus");
    assert_eq!(classes[0]["status"], "pending");
}

#[tokio::test]
async fn test_feedback_on_missing_class_upserts() {
    let app = setup_test_app();
    let admin = app.login_as("boss@x.com", Some(UserRole::Admin)).await;
    let id = ObjectId::new().to_hex();

    let (status, body) = app
        .patch(
            &format!("/classes/feedback/{id}"),
            Some(&admin),
            json!({ "feedback": "Who made this?" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matched_count"], 0);
    assert_eq!(body["upserted_id"], id.as_str());

    let (_, classes) = app.get("/classes", None).await;
    assert_eq!(classes[0]["_id"], id.as_str());
    assert_eq!(classes[0]["feedback"], "Who made this?");
    assert_eq!(classes[0]["status"], "pending");
}

#[tokio::test]
async fn test_moderating_missing_class_is_zero_count() {
    let app = setup_test_app();
    let admin = app.login_as("boss@x.com", Some(UserRole::Admin)).await;

    let (status, body) = app
        .patch(
            &format!("/classes/approved/{}", ObjectId::new().to_hex()),
            Some(&admin),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matched_count"], 0);
    assert_eq!(body["modified_count"], 0);
}

#[tokio::test]
async fn test_non_admin_gets_forbidden_on_moderation() {
    let app = setup_test_app();
    let instructor = app.login_as("teach@x.com", Some(UserRole::Instructor)).await;
    let id = create_class(&app, &instructor, "Tuba").await;

    for route in ["approved", "denied", "feedback"] {
        let (status, _) = app
            .patch(
                &format!("/classes/{route}/{id}"),
                Some(&instructor),
                json!({ "feedback": "self-review" }),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{route}");
    }

    let (status, _) = app
        .patch(&format!("/classes/approved/{id}"), None, json!({}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, classes) = app.get("/classes", None).await;
    assert_eq!(classes[0]["status"], "pending");
    assert!(classes[0].get("feedback").is_none());
}

#[tokio::test]
async fn test_moderation_with_invalid_id() {
    let app = setup_test_app();
    let admin = app.login_as("boss@x.com", Some(UserRole::Admin)).await;

    let (status, _) = app
        .patch("/classes/denied/123", Some(&admin), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_popular_classes_sorted_by_enrollment() {
    let app = setup_test_app();
    for enrolled in [5_i64, 40, 12, 3, 25, 8, 30] {
        app.insert(
            Collection::Classes,
            doc! { "title": format!("c{enrolled}"), "status": "approved", "enrolled": enrolled },
        )
        .await;
    }
    app.insert(
        Collection::Classes,
        doc! { "title": "pending-hit", "status": "pending", "enrolled": 100_i64 },
    )
    .await;

    let (status, body) = app.get("/popular/classes/approved", None).await;
    assert_eq!(status, StatusCode::OK);
    let enrolled: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["enrolled"].as_i64().unwrap())
        .collect();
    assert_eq!(enrolled, vec![40, 30, 25, 12, 8, 5]);
}
