// ABOUTME: Workout session models: started, finished and cancelled workout activities
// ABOUTME: A WorkoutActivity row with completed=false is the resumable in-progress session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::workout::WorkoutWithExercises;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One performed (or in-progress) session of a workout template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutActivity {
    /// Unique identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Template that was performed
    pub workout_id: Uuid,
    /// False while the session is in progress
    pub completed: bool,
    /// UTC calendar date the session started
    pub activity_date: NaiveDate,
    /// Session notes entered on finish
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Recorded performance of one template exercise during a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutActivityExercise {
    /// Unique identifier
    pub id: Uuid,
    /// Parent session
    pub workout_activity_id: Uuid,
    /// Template exercise that was performed; cleared if the template is later edited
    pub workout_exercise_id: Option<Uuid>,
    /// Sets actually completed
    pub sets_completed: u32,
    /// Reps actually completed
    pub reps_completed: u32,
    /// Per-exercise notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// A session with its recorded exercise performances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedActivity {
    /// The session row
    #[serde(flatten)]
    pub activity: WorkoutActivity,
    /// Performance rows written on finish
    pub exercises: Vec<WorkoutActivityExercise>,
}

/// Payload for `POST /api/workouts/start`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartWorkoutRequest {
    /// Template to start
    #[serde(default)]
    pub workout_id: Option<String>,
}

/// Response of `POST /api/workouts/start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartWorkoutResponse {
    /// Id of the new in-progress session
    pub workout_activity_id: Uuid,
    /// Template being performed
    pub workout: WorkoutWithExercises,
}

/// Performance entry in a finish request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisePerformance {
    /// Template exercise id
    pub workout_exercise_id: Uuid,
    /// Sets completed
    #[serde(default)]
    pub sets_completed: u32,
    /// Reps completed
    #[serde(default)]
    pub reps_completed: u32,
    /// Optional notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for `POST /api/workouts/finish`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinishWorkoutRequest {
    /// Session to finish
    #[serde(default)]
    pub workout_activity_id: Option<String>,
    /// Recorded performances
    #[serde(default)]
    pub exercises: Vec<ExercisePerformance>,
    /// Session notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// The caller's in-progress session, used to resume after a reload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSession {
    /// The in-progress session
    pub activity: WorkoutActivity,
    /// Template being performed
    pub workout: WorkoutWithExercises,
}
