// ABOUTME: Exercise catalog search route used when building workout templates
// ABOUTME: Proxies the wger catalog with shaping, caching and retries

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

/// Query parameters for exercise search
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExerciseSearchQuery {
    /// Free-text search term
    pub search: Option<String>,
    /// Page size
    pub limit: Option<u32>,
    /// Page offset
    pub offset: Option<u32>,
}

/// Exercise catalog routes handler
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create the exercise search route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercises", get(Self::handle_search))
            .with_state(resources)
    }

    /// Handle GET /api/exercises
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ExerciseSearchQuery>,
    ) -> Result<Response, AppError> {
        authenticate_request(&headers, &resources).await?;
        let limit = query
            .limit
            .unwrap_or(resources.config.catalog.default_page_size);
        let page = resources
            .catalog
            .search(query.search.as_deref(), limit, query.offset.unwrap_or(0))
            .await?;
        Ok((StatusCode::OK, Json(page)).into_response())
    }
}
