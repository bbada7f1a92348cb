// ABOUTME: End-to-end tests of the typed API client against a locally served router
// ABOUTME: Covers the session context lifecycle, error decoding and a full workout flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::mock_server::serve;
use streakfit::{
    client::{SessionContext, StreakfitClient},
    errors::ErrorCode,
    models::{CreateWorkoutRequest, ExercisePerformance, FinishWorkoutRequest},
    routes,
    utils::http_client::{ResilientClient, RetryPolicy},
};
use tempfile::TempDir;
use uuid::Uuid;

async fn api_base_url() -> String {
    let resources = common::create_test_resources().await.unwrap();
    let addr = serve(routes::router(resources)).await;
    format!("http://{addr}")
}

fn client(base_url: &str, session: SessionContext) -> StreakfitClient {
    let http = ResilientClient::with_policy(reqwest::Client::new(), RetryPolicy::none());
    StreakfitClient::with_http(base_url, http, session).unwrap()
}

#[tokio::test]
async fn test_session_context_lifecycle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("token");

    let session = SessionContext::with_token_file(path.clone());
    assert_eq!(session.init().await.unwrap(), None);

    session.set("abc.def.ghi").await.unwrap();
    assert_eq!(session.token().await.as_deref(), Some("abc.def.ghi"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "abc.def.ghi");

    let restored = SessionContext::with_token_file(path.clone());
    assert_eq!(restored.init().await.unwrap().as_deref(), Some("abc.def.ghi"));

    restored.clear().await.unwrap();
    assert_eq!(restored.token().await, None);
    assert!(!path.exists());
    restored.clear().await.unwrap();
}

#[tokio::test]
async fn test_in_memory_session_never_touches_disk() {
    let session = SessionContext::in_memory();
    assert_eq!(session.init().await.unwrap(), None);
    session.set("token").await.unwrap();
    assert_eq!(session.init().await.unwrap().as_deref(), Some("token"));
    session.clear().await.unwrap();
    assert_eq!(session.token().await, None);
}

#[tokio::test]
async fn test_register_stores_token_and_logout_clears_it() {
    let base_url = api_base_url().await;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token");
    let api = client(&base_url, SessionContext::with_token_file(path.clone()));

    let session = api.register("client@example.com", "secret123").await.unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        session.access_token
    );

    let me = api.me().await.unwrap();
    assert_eq!(me.email, "client@example.com");

    api.logout().await.unwrap();
    assert!(!path.exists());
    assert_eq!(api.session().token().await, None);

    let err = api.me().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);
}

#[tokio::test]
async fn test_server_errors_are_decoded() {
    let base_url = api_base_url().await;
    let api = client(&base_url, SessionContext::in_memory());
    api.register("errors@example.com", "secret123").await.unwrap();

    let err = api.get_workout(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = api
        .activity(Some("2024-02-30"), None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);

    let duplicate = client(&base_url, SessionContext::in_memory());
    let err = duplicate
        .register("errors@example.com", "secret123")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(duplicate.session().token().await, None);
}

#[tokio::test]
async fn test_full_workout_flow() {
    let base_url = api_base_url().await;
    let api = client(&base_url, SessionContext::in_memory());
    api.login("flow@example.com", "secret123").await.unwrap_err();
    api.register("flow@example.com", "secret123").await.unwrap();

    let workout = api
        .create_workout(&CreateWorkoutRequest {
            name: "Morning".to_owned(),
            description: None,
            exercises: vec![common::exercise(81, "Dumbbell Curl")],
        })
        .await
        .unwrap();
    assert_eq!(api.list_workouts().await.unwrap().len(), 1);

    let started = api.start_workout(workout.workout.id).await.unwrap();
    let active = api.active_workout().await.unwrap().unwrap();
    assert_eq!(active.activity.id, started.workout_activity_id);

    let finished = api
        .finish_workout(&FinishWorkoutRequest {
            workout_activity_id: Some(started.workout_activity_id.to_string()),
            exercises: vec![ExercisePerformance {
                workout_exercise_id: workout.exercises[0].id,
                sets_completed: 3,
                reps_completed: 10,
                notes: None,
            }],
            notes: None,
        })
        .await
        .unwrap();
    assert!(finished.activity.completed);
    assert!(api.active_workout().await.unwrap().is_none());

    let activity = api.activity(None, None).await.unwrap();
    assert_eq!(activity.summary.total_workouts, 1);
    assert_eq!(activity.summary.current_streak, 1);
    assert_eq!(activity.data.len(), 366);

    api.delete_workout(workout.workout.id).await.unwrap();
    assert!(api.list_workouts().await.unwrap().is_empty());
}
