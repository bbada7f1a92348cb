// ABOUTME: Typed HTTP client for the StreakFit API used by the CLI and integration tests
// ABOUTME: Owns an explicit session context instead of process-global token state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # API Client
//!
//! [`SessionContext`] holds the bearer token. It is initialised from a token
//! file on start, set on sign-in and sign-up, and cleared on sign-out. Every
//! request goes through a [`ResilientClient`], so transient failures are
//! retried with exponential backoff.

use crate::activity::ActivityResponse;
use crate::config::HttpClientConfig;
use crate::errors::{AppError, AppResult, ErrorResponse};
use crate::models::{
    ActiveSession, AuthSession, CatalogPage, CompletedActivity, CreateWorkoutRequest, Credentials,
    FinishWorkoutRequest, StartWorkoutRequest, StartWorkoutResponse, UpdateWorkoutRequest,
    UserProfile, WorkoutWithExercises,
};
use crate::utils::http_client::ResilientClient;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;
use uuid::Uuid;

const SERVICE_NAME: &str = "streakfit-api";

/// Bearer token holder with optional file persistence
#[derive(Debug, Default)]
pub struct SessionContext {
    token_path: Option<PathBuf>,
    token: RwLock<Option<String>>,
}

impl SessionContext {
    /// Session persisted to `token_path`
    #[must_use]
    pub fn with_token_file(token_path: PathBuf) -> Self {
        Self {
            token_path: Some(token_path),
            token: RwLock::new(None),
        }
    }

    /// Session kept only in memory
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Default token file under the user's config directory
    #[must_use]
    pub fn default_token_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("streakfit").join("token"))
    }

    /// Load a previously stored token, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the token file exists but cannot be read
    pub async fn init(&self) -> AppResult<Option<String>> {
        let Some(path) = &self.token_path else {
            return Ok(self.token().await);
        };
        let stored = match tokio::fs::read_to_string(path).await {
            Ok(contents) => Some(contents.trim().to_owned()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(AppError::internal(format!(
                    "Failed to read token file {}: {e}",
                    path.display()
                )))
            }
        };
        (*self.token.write().await).clone_from(&stored);
        Ok(stored)
    }

    /// Store a new token
    ///
    /// # Errors
    ///
    /// Returns an error if the token file cannot be written
    pub async fn set(&self, token: &str) -> AppResult<()> {
        if let Some(path) = &self.token_path {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::internal(format!("Failed to create {}: {e}", parent.display()))
                })?;
            }
            tokio::fs::write(path, token).await.map_err(|e| {
                AppError::internal(format!("Failed to write token file {}: {e}", path.display()))
            })?;
        }
        *self.token.write().await = Some(token.to_owned());
        Ok(())
    }

    /// Forget the token
    ///
    /// # Errors
    ///
    /// Returns an error if an existing token file cannot be removed
    pub async fn clear(&self) -> AppResult<()> {
        *self.token.write().await = None;
        if let Some(path) = &self.token_path {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(AppError::internal(format!(
                        "Failed to remove token file {}: {e}",
                        path.display()
                    )))
                }
            }
        }
        Ok(())
    }

    /// Current token
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

/// Body of `GET /api/workouts`
#[derive(Debug, Deserialize)]
struct WorkoutList {
    workouts: Vec<WorkoutWithExercises>,
}

/// Body of `POST /api/workouts`
#[derive(Debug, Deserialize)]
struct WorkoutCreated {
    workout: WorkoutWithExercises,
}

/// Body of `POST /api/workouts/finish`
#[derive(Debug, Deserialize)]
struct WorkoutFinished {
    activity: CompletedActivity,
}

/// Body of `GET /api/workouts/activity/active`
#[derive(Debug, Deserialize)]
struct ActiveWorkout {
    active: Option<ActiveSession>,
}

/// Typed client for the StreakFit REST API
pub struct StreakfitClient {
    base_url: Url,
    http: ResilientClient,
    session: SessionContext,
}

impl StreakfitClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8081`)
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` when the URL cannot be parsed
    pub fn new(
        base_url: &str,
        http_config: &HttpClientConfig,
        session: SessionContext,
    ) -> AppResult<Self> {
        Self::with_http(base_url, ResilientClient::new(http_config), session)
    }

    /// Create a client with an explicit HTTP client
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` when the URL cannot be parsed
    pub fn with_http(
        base_url: &str,
        http: ResilientClient,
        session: SessionContext,
    ) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::config(format!("Invalid API URL {base_url}: {e}")))?;
        Ok(Self {
            base_url,
            http,
            session,
        })
    }

    /// Session context holding the bearer token
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Create an account and store its token
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn register(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let session: AuthSession = self
            .request(Method::POST, "/api/auth/register", Some(&credentials(email, password)))
            .await?;
        self.session.set(&session.access_token).await?;
        Ok(session)
    }

    /// Sign in and store the token
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let session: AuthSession = self
            .request(Method::POST, "/api/auth/login", Some(&credentials(email, password)))
            .await?;
        self.session.set(&session.access_token).await?;
        Ok(session)
    }

    /// Revoke the token server-side and forget it locally
    ///
    /// # Errors
    ///
    /// Returns the API error on failure; the local token is cleared either way
    pub async fn logout(&self) -> AppResult<()> {
        let result = self
            .request_empty(Method::POST, "/api/auth/logout", None::<&()>)
            .await;
        self.session.clear().await?;
        result
    }

    /// Profile of the signed-in user
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn me(&self) -> AppResult<UserProfile> {
        self.request(Method::GET, "/api/auth/me", None::<&()>).await
    }

    /// The caller's workouts
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn list_workouts(&self) -> AppResult<Vec<WorkoutWithExercises>> {
        let list: WorkoutList = self
            .request(Method::GET, "/api/workouts", None::<&()>)
            .await?;
        Ok(list.workouts)
    }

    /// Create a workout template
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn create_workout(
        &self,
        request: &CreateWorkoutRequest,
    ) -> AppResult<WorkoutWithExercises> {
        let created: WorkoutCreated = self
            .request(Method::POST, "/api/workouts", Some(request))
            .await?;
        Ok(created.workout)
    }

    /// One workout template
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn get_workout(&self, workout_id: Uuid) -> AppResult<WorkoutWithExercises> {
        self.request(Method::GET, &format!("/api/workouts/{workout_id}"), None::<&()>)
            .await
    }

    /// Update a workout template
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn update_workout(
        &self,
        workout_id: Uuid,
        request: &UpdateWorkoutRequest,
    ) -> AppResult<WorkoutWithExercises> {
        self.request(Method::PUT, &format!("/api/workouts/{workout_id}"), Some(request))
            .await
    }

    /// Delete a workout template
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn delete_workout(&self, workout_id: Uuid) -> AppResult<()> {
        self.request_empty(
            Method::DELETE,
            &format!("/api/workouts/{workout_id}"),
            None::<&()>,
        )
        .await
    }

    /// Start a session of a workout
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn start_workout(&self, workout_id: Uuid) -> AppResult<StartWorkoutResponse> {
        let request = StartWorkoutRequest {
            workout_id: Some(workout_id.to_string()),
        };
        self.request(Method::POST, "/api/workouts/start", Some(&request))
            .await
    }

    /// The in-progress session to resume, if any
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn active_workout(&self) -> AppResult<Option<ActiveSession>> {
        let active: ActiveWorkout = self
            .request(Method::GET, "/api/workouts/activity/active", None::<&()>)
            .await?;
        Ok(active.active)
    }

    /// Finish a session
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn finish_workout(
        &self,
        request: &FinishWorkoutRequest,
    ) -> AppResult<CompletedActivity> {
        let finished: WorkoutFinished = self
            .request(Method::POST, "/api/workouts/finish", Some(request))
            .await?;
        Ok(finished.activity)
    }

    /// Cancel an in-progress session
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn cancel_workout(&self, activity_id: Uuid) -> AppResult<()> {
        self.request_empty(
            Method::DELETE,
            &format!("/api/workouts/activity/{activity_id}"),
            None::<&()>,
        )
        .await
    }

    /// Activity summary for an optional date range
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn activity(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AppResult<ActivityResponse> {
        let mut url = self.url("/api/workouts/activity")?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(start) = start_date {
                query.append_pair("start_date", start);
            }
            if let Some(end) = end_date {
                query.append_pair("end_date", end);
            }
        }
        let response = self.send(Method::GET, url, None::<&()>).await?;
        decode(response).await
    }

    /// Search the exercise catalog
    ///
    /// # Errors
    ///
    /// Returns the API error on failure
    pub async fn search_exercises(
        &self,
        search: Option<&str>,
        limit: Option<u32>,
    ) -> AppResult<CatalogPage> {
        let mut url = self.url("/api/exercises")?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(term) = search {
                query.append_pair("search", term);
            }
            if let Some(limit) = limit {
                query.append_pair("limit", &limit.to_string());
            }
        }
        let response = self.send(Method::GET, url, None::<&()>).await?;
        decode(response).await
    }

    fn url(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::config(format!("Invalid API path {path}: {e}")))
    }

    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> AppResult<Response> {
        let token = self.session.token().await;
        debug!("{method} {url}");
        self.http
            .send(|client| {
                let mut request = client.request(method.clone(), url.clone());
                if let Some(token) = &token {
                    request = request.bearer_auth(token);
                }
                if let Some(body) = body {
                    request = request.json(body);
                }
                request
            })
            .await
            .map_err(|e| AppError::external_unavailable(SERVICE_NAME, e.to_string()))
    }

    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> AppResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        let response = self.send(method, url, body).await?;
        decode(response).await
    }

    async fn request_empty<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<()> {
        let url = self.url(path)?;
        let response = self.send(method, url, body).await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(error_from_response(response).await)
    }
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    response
        .json()
        .await
        .map_err(|e| AppError::external_service(SERVICE_NAME, format!("JSON parse error: {e}")))
}

/// Rebuild the server's `AppError` from an error response body
async fn error_from_response(response: Response) -> AppError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => {
            let mut error = AppError::new(body.error.code, body.error.message);
            if let Some(request_id) = body.error.request_id {
                error = error.with_request_id(request_id);
            }
            error
        }
        Err(_) if status == StatusCode::UNAUTHORIZED => AppError::auth_required(),
        Err(_) => AppError::external_service(SERVICE_NAME, format!("HTTP {status}: {text}")),
    }
}
