// ABOUTME: Workout activity summary route for the calendar heatmap
// ABOUTME: Returns zero-filled per-day counts with totals and streaks for the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::{context::ServerResources, errors::AppError, middleware::authenticate_request};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for the activity summary
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActivityQuery {
    /// First day, `YYYY-MM-DD`; defaults to 365 days before `end_date`
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`; defaults to today (UTC)
    pub end_date: Option<String>,
}

/// Activity routes handler
pub struct ActivityRoutes;

impl ActivityRoutes {
    /// Create the activity summary route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts/activity", get(Self::handle_activity))
            .with_state(resources)
    }

    /// Handle GET /api/workouts/activity
    async fn handle_activity(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ActivityQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let response = resources
            .activity
            .get_activity_summary(
                auth.user_id,
                query.start_date.as_deref(),
                query.end_date.as_deref(),
            )
            .await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
