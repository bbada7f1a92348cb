// ABOUTME: Integration tests for workout session routes: start, resume, finish and cancel
// ABOUTME: Tests idempotent finishing, performance validation and ownership of sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};
use std::sync::Arc;
use streakfit::{context::ServerResources, routes::WorkoutRoutes};
use uuid::Uuid;

struct Started {
    activity_id: String,
    workout: Value,
}

async fn start_session(resources: &Arc<ServerResources>, token: &str) -> Started {
    let created = AxumTestRequest::post("/api/workouts")
        .bearer(token)
        .json(&common::workout_body("Session Template"))
        .send(WorkoutRoutes::routes(Arc::clone(resources)))
        .await
        .assert_status(StatusCode::CREATED);
    let created: Value = created.json();
    let workout_id = created["workout"]["id"].as_str().unwrap().to_owned();

    let started = AxumTestRequest::post("/api/workouts/start")
        .bearer(token)
        .json(&json!({ "workout_id": workout_id }))
        .send(WorkoutRoutes::routes(Arc::clone(resources)))
        .await
        .assert_status(StatusCode::CREATED);
    let started: Value = started.json();

    Started {
        activity_id: started["workout_activity_id"].as_str().unwrap().to_owned(),
        workout: started["workout"].clone(),
    }
}

#[tokio::test]
async fn test_start_returns_template_and_is_resumable() {
    let resources = common::create_test_resources().await.unwrap();
    let session = common::create_test_user(&resources).await.unwrap();
    let token = session.access_token.as_str();

    let started = start_session(&resources, token).await;
    assert_eq!(started.workout["name"], "Session Template");
    assert_eq!(started.workout["exercises"].as_array().unwrap().len(), 2);

    let active = AxumTestRequest::get("/api/workouts/activity/active")
        .bearer(token)
        .send(WorkoutRoutes::routes(resources))
        .await;
    assert_eq!(active.status(), 200);
    let active: Value = active.json();
    assert_eq!(active["active"]["activity"]["id"], started.activity_id.as_str());
    assert_eq!(active["active"]["activity"]["completed"], false);
    assert_eq!(active["active"]["workout"]["id"], started.workout["id"]);
}

#[tokio::test]
async fn test_finish_records_performance_and_is_idempotent() {
    let resources = common::create_test_resources().await.unwrap();
    let session = common::create_test_user(&resources).await.unwrap();
    let token = session.access_token.as_str();

    let started = start_session(&resources, token).await;
    let first_exercise = started.workout["exercises"][0]["id"].as_str().unwrap();
    let finish_body = json!({
        "workout_activity_id": started.activity_id,
        "notes": "  felt strong  ",
        "exercises": [
            {"workout_exercise_id": first_exercise, "sets_completed": 3, "reps_completed": 12}
        ]
    });

    let finished = AxumTestRequest::post("/api/workouts/finish")
        .bearer(token)
        .json(&finish_body)
        .send(WorkoutRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(finished.status(), 200);
    let finished: Value = finished.json();
    let activity = &finished["activity"];
    assert_eq!(activity["completed"], true);
    assert_eq!(activity["notes"], "felt strong");
    assert_eq!(activity["exercises"].as_array().unwrap().len(), 1);
    assert_eq!(activity["exercises"][0]["reps_completed"], 12);

    let again = AxumTestRequest::post("/api/workouts/finish")
        .bearer(token)
        .json(&json!({
            "workout_activity_id": started.activity_id,
            "notes": "second attempt",
            "exercises": []
        }))
        .send(WorkoutRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(again.status(), 200);
    let again: Value = again.json();
    assert_eq!(again["activity"]["notes"], "felt strong");
    assert_eq!(again["activity"]["exercises"].as_array().unwrap().len(), 1);

    let active = AxumTestRequest::get("/api/workouts/activity/active")
        .bearer(token)
        .send(WorkoutRoutes::routes(Arc::clone(&resources)))
        .await;
    let active: Value = active.json();
    assert!(active["active"].is_null());

    let summary = resources
        .activity
        .get_activity_summary(session.user.id, None, None)
        .await
        .unwrap();
    assert_eq!(summary.summary.total_workouts, 1);
    assert_eq!(summary.summary.current_streak, 1);
}

#[tokio::test]
async fn test_finish_rejects_foreign_exercise() {
    let resources = common::create_test_resources().await.unwrap();
    let session = common::create_test_user(&resources).await.unwrap();
    let token = session.access_token.as_str();

    let started = start_session(&resources, token).await;
    let response = AxumTestRequest::post("/api/workouts/finish")
        .bearer(token)
        .json(&json!({
            "workout_activity_id": started.activity_id,
            "exercises": [{"workout_exercise_id": Uuid::new_v4(), "sets_completed": 1}]
        }))
        .send(WorkoutRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(response.error_code(), "INVALID_INPUT");

    let active = resources
        .sessions
        .active_workout(session.user.id)
        .await
        .unwrap();
    assert!(active.is_some());
}

#[tokio::test]
async fn test_cancel_in_progress_and_completed_sessions() {
    let resources = common::create_test_resources().await.unwrap();
    let session = common::create_test_user(&resources).await.unwrap();
    let token = session.access_token.as_str();

    let started = start_session(&resources, token).await;
    AxumTestRequest::delete(&format!("/api/workouts/activity/{}", started.activity_id))
        .bearer(token)
        .send(WorkoutRoutes::routes(Arc::clone(&resources)))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let cancelled_again =
        AxumTestRequest::delete(&format!("/api/workouts/activity/{}", started.activity_id))
            .bearer(token)
            .send(WorkoutRoutes::routes(Arc::clone(&resources)))
            .await;
    assert_eq!(cancelled_again.status(), 404);

    let second = start_session(&resources, token).await;
    AxumTestRequest::post("/api/workouts/finish")
        .bearer(token)
        .json(&json!({ "workout_activity_id": second.activity_id }))
        .send(WorkoutRoutes::routes(Arc::clone(&resources)))
        .await
        .assert_status(StatusCode::OK);

    let response = AxumTestRequest::delete(&format!("/api/workouts/activity/{}", second.activity_id))
        .bearer(token)
        .send(WorkoutRoutes::routes(resources))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_start_validation() {
    let resources = common::create_test_resources().await.unwrap();
    let session = common::create_test_user(&resources).await.unwrap();
    let other = common::create_test_user(&resources).await.unwrap();
    let token = session.access_token.as_str();

    let missing = AxumTestRequest::post("/api/workouts/start")
        .bearer(token)
        .json(&json!({}))
        .send(WorkoutRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(missing.status(), 400);
    assert_eq!(missing.error_code(), "MISSING_REQUIRED_FIELD");

    let malformed = AxumTestRequest::post("/api/workouts/start")
        .bearer(token)
        .json(&json!({"workout_id": "abc"}))
        .send(WorkoutRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(malformed.error_code(), "INVALID_FORMAT");

    let foreign = common::insert_workout(resources.database.as_ref(), other.user.id)
        .await
        .unwrap();
    let response = AxumTestRequest::post("/api/workouts/start")
        .bearer(token)
        .json(&json!({ "workout_id": foreign.id }))
        .send(WorkoutRoutes::routes(resources))
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_sessions_are_isolated_per_user() {
    let resources = common::create_test_resources().await.unwrap();
    let owner = common::create_test_user(&resources).await.unwrap();
    let intruder = common::create_test_user(&resources).await.unwrap();

    let started = start_session(&resources, &owner.access_token).await;

    let finish = AxumTestRequest::post("/api/workouts/finish")
        .bearer(&intruder.access_token)
        .json(&json!({ "workout_activity_id": started.activity_id }))
        .send(WorkoutRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(finish.status(), 404);

    let cancel = AxumTestRequest::delete(&format!("/api/workouts/activity/{}", started.activity_id))
        .bearer(&intruder.access_token)
        .send(WorkoutRoutes::routes(Arc::clone(&resources)))
        .await;
    assert_eq!(cancel.status(), 404);

    let intruder_active = resources
        .sessions
        .active_workout(intruder.user.id)
        .await
        .unwrap();
    assert!(intruder_active.is_none());
}
