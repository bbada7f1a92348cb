// ABOUTME: Route module organization for StreakFit HTTP endpoints
// ABOUTME: Assembles domain routers and applies tracing, CORS and timeout layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the StreakFit server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Workout activity summary routes
pub mod activity;
/// Authentication routes
pub mod auth;
/// Exercise catalog routes
pub mod exercises;
/// Health check routes
pub mod health;
/// Workout template and session routes
pub mod workouts;

pub use activity::ActivityRoutes;
pub use auth::AuthRoutes;
pub use exercises::ExerciseRoutes;
pub use health::HealthRoutes;
pub use workouts::WorkoutRoutes;

use crate::context::ServerResources;
use crate::errors::AppError;
use crate::middleware::{setup_cors, with_request_tracing};
use axum::extract::rejection::JsonRejection;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Build the complete HTTP router
pub fn router(resources: Arc<ServerResources>) -> Router {
    let timeout = Duration::from_secs(resources.config.request_timeout_secs);
    let cors = setup_cors(&resources.config.cors);

    let app = Router::new()
        .merge(HealthRoutes::routes())
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(ActivityRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(&resources)))
        .merge(ExerciseRoutes::routes(resources))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors);

    with_request_tracing(app)
}

/// Map a JSON body rejection onto the standard error body
pub(crate) fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text()))
}
