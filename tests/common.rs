// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, server resources and signed-in user helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `streakfit`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use std::sync::{Arc, Once};
use streakfit::{
    config::{
        ActivityConfig, AuthConfig, CatalogConfig, CorsConfig, DatabaseConfig, Environment,
        HttpClientConfig, ServerConfig,
    },
    constants::activity::DATE_FORMAT,
    context::ServerResources,
    database::Database,
    database_plugins::DatabaseProvider,
    models::{AuthSession, Credentials, NewWorkoutExercise, Workout, WorkoutActivity},
};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    let database = Database::new("sqlite::memory:", 1).await?;
    Ok(Arc::new(database))
}

/// Configuration suitable for tests: cheap bcrypt, no retries
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        environment: Environment::Testing,
        request_timeout_secs: 30,
        database: DatabaseConfig {
            url: "sqlite::memory:".to_owned(),
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: "test-secret-that-is-at-least-32-chars".to_owned(),
            token_expiry_hours: 24,
            bcrypt_cost: 4,
        },
        catalog: CatalogConfig {
            base_url: "http://127.0.0.1:9".to_owned(),
            ..CatalogConfig::default()
        },
        activity: ActivityConfig::default(),
        http_client: HttpClientConfig {
            max_retries: 0,
            retry_base_delay_ms: 1,
            retry_max_delay_ms: 1,
            ..HttpClientConfig::default()
        },
        cors: CorsConfig::default(),
    }
}

/// Resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let (resources, _) = create_test_resources_with_database(test_config()).await?;
    Ok(resources)
}

/// Resources plus the concrete database handle, for tests that need to close it
pub async fn create_test_resources_with_database(
    config: ServerConfig,
) -> Result<(Arc<ServerResources>, Arc<Database>)> {
    let database = create_test_database().await?;
    let provider: Arc<dyn DatabaseProvider> = database.clone();
    let resources = ServerResources::new(provider, Arc::new(config));
    Ok((Arc::new(resources), database))
}

/// Register a user with a unique email and return the session
pub async fn create_test_user(resources: &ServerResources) -> Result<AuthSession> {
    let credentials = Credentials {
        email: format!("user-{}@example.com", Uuid::new_v4().simple()),
        password: "password123".to_owned(),
    };
    Ok(resources.identity.sign_up(&credentials).await?)
}

/// A valid exercise entry for create and update requests
pub fn exercise(exercise_id: i64, name: &str) -> NewWorkoutExercise {
    NewWorkoutExercise {
        exercise_id,
        exercise_name: name.to_owned(),
        sets: 3,
        reps: 10,
        rest_time_seconds: 60,
        exercise_order: None,
    }
}

/// JSON body for `POST /api/workouts`
pub fn workout_body(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": "Upper body",
        "exercises": [
            {"exercise_id": 81, "exercise_name": "Dumbbell Curl", "sets": 3, "reps": 12},
            {"exercise_id": 111, "exercise_name": "Barbell Squat", "sets": 5, "reps": 5, "rest_time_seconds": 120}
        ]
    })
}

/// Insert a workout template row directly
pub async fn insert_workout(database: &dyn DatabaseProvider, user_id: Uuid) -> Result<Workout> {
    let now = Utc::now();
    let workout = Workout {
        id: Uuid::new_v4(),
        user_id,
        name: "Seeded".to_owned(),
        description: None,
        created_at: now,
        updated_at: now,
    };
    database.create_workout(&workout, &[]).await?;
    Ok(workout)
}

/// Insert a completed activity dated `date`
pub async fn insert_completion(
    database: &dyn DatabaseProvider,
    user_id: Uuid,
    workout_id: Uuid,
    date: NaiveDate,
) -> Result<()> {
    let now = Utc::now();
    let activity = WorkoutActivity {
        id: Uuid::new_v4(),
        user_id,
        workout_id,
        completed: false,
        activity_date: date,
        notes: None,
        created_at: now,
        updated_at: now,
    };
    database.create_activity(&activity).await?;
    database
        .complete_activity(user_id, activity.id, None, &[], now)
        .await?;
    Ok(())
}

/// Parse a `YYYY-MM-DD` literal
pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, DATE_FORMAT).unwrap()
}
