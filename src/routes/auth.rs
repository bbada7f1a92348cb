// ABOUTME: Authentication route handlers for registration, login, logout and profile
// ABOUTME: Thin handlers over the identity provider returning bearer access tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::json_rejection;
use crate::{
    context::ServerResources, errors::AppError, middleware::authenticate_request,
    models::Credentials,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/register", post(Self::handle_register))
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/logout", post(Self::handle_logout))
            .route("/api/auth/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Handle POST /api/auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<Credentials>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(credentials) = payload.map_err(json_rejection)?;
        let session = resources.identity.sign_up(&credentials).await?;
        Ok((StatusCode::CREATED, Json(session)).into_response())
    }

    /// Handle POST /api/auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<Credentials>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(credentials) = payload.map_err(json_rejection)?;
        let session = resources.identity.sign_in(&credentials).await?;
        Ok((StatusCode::OK, Json(session)).into_response())
    }

    /// Handle POST /api/auth/logout
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        resources.identity.sign_out(&auth).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle GET /api/auth/me
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let profile = resources.identity.current_user(&auth).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
