// ABOUTME: Integration tests for registration, login, logout and profile routes
// ABOUTME: Tests credential validation, duplicate accounts and token revocation on sign-out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};
use std::sync::Arc;
use streakfit::routes::AuthRoutes;

#[tokio::test]
async fn test_register_login_and_me() {
    let resources = common::create_test_resources().await.unwrap();
    let credentials = json!({"email": "  Runner@Example.com ", "password": "secret123"});

    let registered = AxumTestRequest::post("/api/auth/register")
        .json(&credentials)
        .send(AuthRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(registered.status(), 201);
    let registered: Value = registered.json();
    assert_eq!(registered["token_type"], "Bearer");
    assert_eq!(registered["user"]["email"], "runner@example.com");
    assert!(registered["user"].get("password_hash").is_none());

    let login = AxumTestRequest::post("/api/auth/login")
        .json(&json!({"email": "runner@example.com", "password": "secret123"}))
        .send(AuthRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(login.status(), 200);
    let login: Value = login.json();
    let token = login["access_token"].as_str().unwrap();

    let me = AxumTestRequest::get("/api/auth/me")
        .bearer(token)
        .send(AuthRoutes::routes(resources))
        .await;
    assert_eq!(me.status(), 200);
    let me: Value = me.json();
    assert_eq!(me["id"], registered["user"]["id"]);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let resources = common::create_test_resources().await.unwrap();
    let credentials = json!({"email": "dup@example.com", "password": "secret123"});

    AxumTestRequest::post("/api/auth/register")
        .json(&credentials)
        .send(AuthRoutes::routes(Arc::clone(&resources)))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let again = AxumTestRequest::post("/api/auth/register")
        .json(&json!({"email": "DUP@example.com", "password": "another123"}))
        .send(AuthRoutes::routes(resources))
        .await;
    assert_eq!(again.status(), 409);
    assert_eq!(again.error_code(), "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_validation() {
    let resources = common::create_test_resources().await.unwrap();

    let short_password = AxumTestRequest::post("/api/auth/register")
        .json(&json!({"email": "short@example.com", "password": "123"}))
        .send(AuthRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(short_password.status(), 400);

    let bad_email = AxumTestRequest::post("/api/auth/register")
        .json(&json!({"email": "not-an-email", "password": "secret123"}))
        .send(AuthRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(bad_email.error_code(), "INVALID_FORMAT");

    let missing_email = AxumTestRequest::post("/api/auth/register")
        .json(&json!({"password": "secret123"}))
        .send(AuthRoutes::routes(resources))
        .await;
    assert_eq!(missing_email.error_code(), "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let resources = common::create_test_resources().await.unwrap();
    let session = common::create_test_user(&resources).await.unwrap();

    let response = AxumTestRequest::post("/api/auth/login")
        .json(&json!({"email": session.user.email, "password": "wrong-password"}))
        .send(AuthRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(response.status(), 401);
    assert_eq!(response.error_code(), "AUTH_INVALID");

    let unknown = AxumTestRequest::post("/api/auth/login")
        .json(&json!({"email": "nobody@example.com", "password": "password123"}))
        .send(AuthRoutes::routes(resources))
        .await;
    assert_eq!(unknown.status(), 401);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let resources = common::create_test_resources().await.unwrap();
    let session = common::create_test_user(&resources).await.unwrap();
    let token = session.access_token.as_str();

    let logout = AxumTestRequest::post("/api/auth/logout")
        .bearer(token)
        .send(AuthRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(logout.status(), 204);

    let me = AxumTestRequest::get("/api/auth/me")
        .bearer(token)
        .send(AuthRoutes::routes(resources))
        .await;
    assert_eq!(me.status(), 401);
    assert_eq!(me.error_code(), "AUTH_EXPIRED");
}

#[tokio::test]
async fn test_me_requires_bearer_scheme() {
    let resources = common::create_test_resources().await.unwrap();
    let session = common::create_test_user(&resources).await.unwrap();

    let response = AxumTestRequest::get("/api/auth/me")
        .header("authorization", &format!("Token {}", session.access_token))
        .send(AuthRoutes::routes(resources))
        .await;
    assert_eq!(response.status(), 401);
    assert_eq!(response.error_code(), "AUTH_REQUIRED");
}
