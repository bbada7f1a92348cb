// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides a liveness endpoint reporting service name and version
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{endpoints::HEALTH_CHECK, service_names::STREAKFIT_SERVER};
use axum::{routing::get, Json, Router};

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes() -> Router {
        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "service": STREAKFIT_SERVER,
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        Router::new().route(HEALTH_CHECK, get(health_handler))
    }
}
