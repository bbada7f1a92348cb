// ABOUTME: Workout template models: named, ordered lists of exercises owned by a user
// ABOUTME: Includes the request payloads used to create and update templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A workout template owned by a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Display name, never empty
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// One exercise slot inside a workout template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Unique identifier
    pub id: Uuid,
    /// Parent workout
    pub workout_id: Uuid,
    /// Exercise id in the external catalog
    pub exercise_id: i64,
    /// Name captured when the exercise was added
    pub exercise_name: String,
    /// Planned sets
    pub sets: u32,
    /// Planned repetitions per set
    pub reps: u32,
    /// Rest between sets
    pub rest_time_seconds: u32,
    /// Position in the template, ascending
    pub exercise_order: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A workout together with its exercises in template order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutWithExercises {
    /// The workout row
    #[serde(flatten)]
    pub workout: Workout,
    /// Exercises ordered by `exercise_order`
    pub exercises: Vec<WorkoutExercise>,
}

/// Exercise entry in a create or update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkoutExercise {
    /// Exercise id in the external catalog
    pub exercise_id: i64,
    /// Exercise display name
    pub exercise_name: String,
    /// Planned sets
    #[serde(default = "default_sets")]
    pub sets: u32,
    /// Planned repetitions per set
    #[serde(default = "default_reps")]
    pub reps: u32,
    /// Rest between sets
    #[serde(default = "default_rest_seconds")]
    pub rest_time_seconds: u32,
    /// Position in the template; list position is used when absent
    #[serde(default)]
    pub exercise_order: Option<u32>,
}

const fn default_sets() -> u32 {
    3
}

const fn default_reps() -> u32 {
    10
}

const fn default_rest_seconds() -> u32 {
    60
}

/// Payload for `POST /api/workouts`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateWorkoutRequest {
    /// Workout name, trimmed before validation
    #[serde(default)]
    pub name: String,
    /// Optional description; blank becomes `None`
    #[serde(default)]
    pub description: Option<String>,
    /// At least one exercise is required
    #[serde(default)]
    pub exercises: Vec<NewWorkoutExercise>,
}

/// Payload for `PUT /api/workouts/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkoutRequest {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New description; an empty string clears it
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement exercise list
    #[serde(default)]
    pub exercises: Option<Vec<NewWorkoutExercise>>,
}
