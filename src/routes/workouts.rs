// ABOUTME: Route handlers for workout templates and workout sessions
// ABOUTME: CRUD on templates plus start, resume, finish and cancel of sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Workout routes
//!
//! All endpoints require a bearer token and only ever touch the caller's
//! own rows. Missing or foreign ids both answer 404.

use super::json_rejection;
use crate::{
    context::ServerResources,
    errors::AppError,
    middleware::authenticate_request,
    models::{
        ActiveSession, CreateWorkoutRequest, FinishWorkoutRequest, StartWorkoutRequest,
        UpdateWorkoutRequest, WorkoutWithExercises,
    },
    services::parse_resource_id,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Response for `GET /api/workouts`
#[derive(Debug, Serialize)]
pub struct WorkoutListResponse {
    /// The caller's workouts
    pub workouts: Vec<WorkoutWithExercises>,
}

/// Response for `POST /api/workouts`
#[derive(Debug, Serialize)]
pub struct WorkoutCreatedResponse {
    /// The stored workout
    pub workout: WorkoutWithExercises,
}

/// Response for `GET /api/workouts/activity/active`
#[derive(Debug, Serialize)]
pub struct ActiveSessionResponse {
    /// In-progress session or `null`
    pub active: Option<ActiveSession>,
}

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/workouts",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/api/workouts/start", post(Self::handle_start))
            .route("/api/workouts/finish", post(Self::handle_finish))
            .route("/api/workouts/activity/active", get(Self::handle_active))
            .route("/api/workouts/activity/:id", delete(Self::handle_cancel))
            .route(
                "/api/workouts/:id",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/workouts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let workouts = resources.workouts.list_workouts(auth.user_id).await?;
        Ok((StatusCode::OK, Json(WorkoutListResponse { workouts })).into_response())
    }

    /// Handle POST /api/workouts
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<CreateWorkoutRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let Json(request) = payload.map_err(json_rejection)?;
        let workout = resources
            .workouts
            .create_workout(auth.user_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(WorkoutCreatedResponse { workout })).into_response())
    }

    /// Handle GET /api/workouts/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let workout_id = parse_resource_id("Workout", &id)?;
        let workout = resources
            .workouts
            .get_workout(auth.user_id, workout_id)
            .await?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle PUT /api/workouts/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        payload: Result<Json<UpdateWorkoutRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let workout_id = parse_resource_id("Workout", &id)?;
        let Json(request) = payload.map_err(json_rejection)?;
        let workout = resources
            .workouts
            .update_workout(auth.user_id, workout_id, request)
            .await?;
        Ok((StatusCode::OK, Json(workout)).into_response())
    }

    /// Handle DELETE /api/workouts/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let workout_id = parse_resource_id("Workout", &id)?;
        resources
            .workouts
            .delete_workout(auth.user_id, workout_id)
            .await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Handle POST /api/workouts/start
    async fn handle_start(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<StartWorkoutRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let Json(request) = payload.map_err(json_rejection)?;
        let started = resources
            .sessions
            .start_workout(auth.user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(started)).into_response())
    }

    /// Handle POST /api/workouts/finish
    async fn handle_finish(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        payload: Result<Json<FinishWorkoutRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let Json(request) = payload.map_err(json_rejection)?;
        let activity = resources
            .sessions
            .finish_workout(auth.user_id, request)
            .await?;
        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "activity": activity })),
        )
            .into_response())
    }

    /// Handle GET /api/workouts/activity/active
    async fn handle_active(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let active = resources.sessions.active_workout(auth.user_id).await?;
        Ok((StatusCode::OK, Json(ActiveSessionResponse { active })).into_response())
    }

    /// Handle DELETE /api/workouts/activity/:id
    async fn handle_cancel(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate_request(&headers, &resources).await?;
        let activity_id = parse_resource_id("Workout activity", &id)?;
        resources
            .sessions
            .cancel_workout(auth.user_id, activity_id)
            .await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
