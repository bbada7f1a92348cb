// ABOUTME: Bearer token authentication for REST handlers
// ABOUTME: Resolves the Authorization header to the calling user through the identity provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::auth::{bearer_token, AuthResult};
use crate::context::ServerResources;
use crate::errors::{AppError, AppResult};
use axum::http::{header::AUTHORIZATION, HeaderMap};

/// Authenticate a request from its `Authorization: Bearer <token>` header
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` when the header is missing or not a bearer
/// credential, and `AUTH_INVALID`/`AUTH_EXPIRED` when the token is rejected
#[tracing::instrument(skip_all, fields(user_id = tracing::field::Empty))]
pub async fn authenticate_request(
    headers: &HeaderMap,
    resources: &ServerResources,
) -> AppResult<AuthResult> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(AppError::auth_required)?;

    match resources.identity.resolve_user(token).await {
        Ok(auth) => {
            tracing::Span::current().record("user_id", auth.user_id.to_string());
            Ok(auth)
        }
        Err(e) => {
            tracing::debug!("Bearer token rejected: {e}");
            Err(e)
        }
    }
}
