// ABOUTME: Core data models shared by the server, the API client and the CLI
// ABOUTME: Users, workout templates, workout sessions and exercise catalog entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Exercise catalog projection
pub mod exercise;
/// Workout sessions (activities)
pub mod session;
/// User accounts and auth sessions
pub mod user;
/// Workout templates
pub mod workout;

pub use exercise::{CatalogPage, ExerciseSummary};
pub use session::{
    ActiveSession, CompletedActivity, ExercisePerformance, FinishWorkoutRequest,
    StartWorkoutRequest, StartWorkoutResponse, WorkoutActivity, WorkoutActivityExercise,
};
pub use user::{AuthSession, Credentials, User, UserProfile};
pub use workout::{
    CreateWorkoutRequest, NewWorkoutExercise, UpdateWorkoutRequest, Workout, WorkoutExercise,
    WorkoutWithExercises,
};
