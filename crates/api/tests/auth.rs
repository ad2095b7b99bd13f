//! Integration tests for registration, login, and JWT-protected access.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get_auth, register, send};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: register, then fetch the account with the returned token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_and_me_roundtrip(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register(&app, "new@example.com").await;

    let response = get_auth(&app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["email"], "new@example.com");
    assert_eq!(json["name"], "Test User");
    // The password hash must never leave the server.
    assert!(json.get("password_hash").is_none());
}

// ---------------------------------------------------------------------------
// Test: login with correct and wrong credentials
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_verifies_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(&app, "login@example.com").await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({
            "email": "login@example.com",
            "password": "correct-horse-battery",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["expires_in"].as_i64().unwrap() > 0);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({
            "email": "login@example.com",
            "password": "wrong-password",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: duplicate email registration conflicts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_registration_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(&app, "dupe@example.com").await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "name": "Someone Else",
            "email": "dupe@example.com",
            "password": "another-password",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Test: invalid registration payloads are rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_registration_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Bad email.
    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "name": "Bad Email",
            "email": "not-an-email",
            "password": "long-enough-password",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Short password.
    let response = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "name": "Short Password",
            "email": "short@example.com",
            "password": "short",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: protected routes reject missing or malformed tokens
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn protected_routes_require_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send(&app, Method::GET, "/api/v1/items", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(&app, "/api/v1/items", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}
