//! Integration tests for the `/alert-preferences` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, put_json};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Test: first GET creates and returns the default preference
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_creates_default_preference(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let app = common::build_test_app(pool);

    let response = get(app, &format!("/api/v1/alert-preferences/{user_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = &body["data"];

    assert_eq!(data["user_id"], user_id.to_string());
    assert_eq!(data["kp_threshold"], 5);
    assert_eq!(data["is_enabled"], true);
    assert!(data["email"].is_null());
    assert!(data["city_name"].is_null());
    assert!(data["last_notification_sent"].is_null());
}

// ---------------------------------------------------------------------------
// Test: PUT merges partially, leaving absent fields unchanged
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn put_merges_partially(pool: PgPool) {
    let user_id = Uuid::new_v4();
    let path = format!("/api/v1/alert-preferences/{user_id}");

    let response = put_json(
        common::build_test_app(pool.clone()),
        &path,
        json!({ "email": "watcher@example.com", "kp_threshold": 7 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Only toggle the enabled flag; the rest must survive.
    let response = put_json(
        common::build_test_app(pool),
        &path,
        json!({ "is_enabled": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = &body["data"];

    assert_eq!(data["email"], "watcher@example.com");
    assert_eq!(data["kp_threshold"], 7);
    assert_eq!(data["is_enabled"], false);
}

// ---------------------------------------------------------------------------
// Test: PUT stores the location triple as a unit
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn put_stores_location(pool: PgPool) {
    let user_id = Uuid::new_v4();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/alert-preferences/{user_id}"),
        json!({
            "location": {
                "latitude": 64.84,
                "longitude": -147.72,
                "city_name": "Fairbanks"
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = &body["data"];

    assert_eq!(data["latitude"], 64.84);
    assert_eq!(data["longitude"], -147.72);
    assert_eq!(data["city_name"], "Fairbanks");
}

// ---------------------------------------------------------------------------
// Test: out-of-scale threshold is rejected with a validation error
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn put_rejects_out_of_scale_threshold(pool: PgPool) {
    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/alert-preferences/{}", Uuid::new_v4()),
        json!({ "kp_threshold": 15 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: malformed email is rejected with a validation error
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn put_rejects_malformed_email(pool: PgPool) {
    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/alert-preferences/{}", Uuid::new_v4()),
        json!({ "email": "not-an-address" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: an incomplete location triple is rejected at deserialization
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn put_rejects_incomplete_location(pool: PgPool) {
    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/alert-preferences/{}", Uuid::new_v4()),
        json!({ "location": { "latitude": 64.84 } }),
    )
    .await;

    // Missing longitude/city_name fails JSON deserialization.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Test: a non-UUID user id is rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_rejects_non_uuid_user_id(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        "/api/v1/alert-preferences/not-a-uuid",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
