// ABOUTME: Workout template business logic: validation, normalization and ownership checks
// ABOUTME: Builds rows for the database layer and maps missing rows to not-found errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::models::{
    CreateWorkoutRequest, NewWorkoutExercise, UpdateWorkoutRequest, Workout, WorkoutExercise,
    WorkoutWithExercises,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const WORKOUT: &str = "Workout";

/// Parse a path id, naming the resource in the error
///
/// # Errors
///
/// Returns `INVALID_FORMAT` when `raw` is not a UUID
pub fn parse_resource_id(resource: &str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::invalid_format(format!("{resource} id must be a UUID")))
}

/// Owner-scoped workout template operations
#[derive(Clone)]
pub struct WorkoutService {
    database: Arc<dyn DatabaseProvider>,
}

impl WorkoutService {
    /// Create a workout service
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseProvider>) -> Self {
        Self { database }
    }

    /// All of a user's workouts, most recently updated first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_workouts(&self, user_id: Uuid) -> AppResult<Vec<WorkoutWithExercises>> {
        self.database.list_workouts(user_id).await
    }

    /// One of the user's workouts
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when the workout is absent or owned by someone else
    pub async fn get_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> AppResult<WorkoutWithExercises> {
        self.database
            .get_workout(user_id, workout_id)
            .await?
            .ok_or_else(|| AppError::not_found(WORKOUT))
    }

    /// Validate and store a new workout with its exercises
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name or empty exercise list,
    /// or a database error if the insert fails
    pub async fn create_workout(
        &self,
        user_id: Uuid,
        request: CreateWorkoutRequest,
    ) -> AppResult<WorkoutWithExercises> {
        let name = validate_name(&request.name)?;
        if request.exercises.is_empty() {
            return Err(AppError::invalid_input("At least one exercise is required"));
        }

        let now = Utc::now();
        let workout = Workout {
            id: Uuid::new_v4(),
            user_id,
            name,
            description: normalize_description(request.description),
            created_at: now,
            updated_at: now,
        };
        let exercises = build_exercises(workout.id, &request.exercises, now)?;

        self.database.create_workout(&workout, &exercises).await?;
        info!(user_id = %user_id, workout_id = %workout.id, "Workout created");

        Ok(WorkoutWithExercises { workout, exercises })
    }

    /// Apply a partial update; a present exercise list replaces the old one
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for a missing workout and validation
    /// errors for a blank name or empty replacement list
    pub async fn update_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        request: UpdateWorkoutRequest,
    ) -> AppResult<WorkoutWithExercises> {
        let existing = self.get_workout(user_id, workout_id).await?;
        let now = Utc::now();

        let mut workout = existing.workout;
        if let Some(name) = request.name.as_deref() {
            workout.name = validate_name(name)?;
        }
        if request.description.is_some() {
            workout.description = normalize_description(request.description);
        }
        workout.updated_at = now;

        let exercises = match request.exercises.as_deref() {
            Some([]) => return Err(AppError::invalid_input("At least one exercise is required")),
            Some(items) => Some(build_exercises(workout.id, items, now)?),
            None => None,
        };

        if !self
            .database
            .update_workout(&workout, exercises.as_deref())
            .await?
        {
            return Err(AppError::not_found(WORKOUT));
        }
        info!(user_id = %user_id, workout_id = %workout_id, "Workout updated");

        Ok(WorkoutWithExercises {
            workout,
            exercises: exercises.unwrap_or(existing.exercises),
        })
    }

    /// Delete a workout together with its exercises and sessions
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` when nothing was deleted
    pub async fn delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> AppResult<()> {
        if !self.database.delete_workout(user_id, workout_id).await? {
            return Err(AppError::not_found(WORKOUT));
        }
        info!(user_id = %user_id, workout_id = %workout_id, "Workout deleted");
        Ok(())
    }
}

fn validate_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::invalid_input("Workout name is required"));
    }
    Ok(name.to_owned())
}

fn normalize_description(raw: Option<String>) -> Option<String> {
    raw.map(|d| d.trim().to_owned()).filter(|d| !d.is_empty())
}

fn build_exercises(
    workout_id: Uuid,
    items: &[NewWorkoutExercise],
    now: DateTime<Utc>,
) -> AppResult<Vec<WorkoutExercise>> {
    let mut exercises = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let exercise_name = item.exercise_name.trim();
            if exercise_name.is_empty() {
                return Err(AppError::invalid_input("Exercise name is required"));
            }
            Ok(WorkoutExercise {
                id: Uuid::new_v4(),
                workout_id,
                exercise_id: item.exercise_id,
                exercise_name: exercise_name.to_owned(),
                sets: item.sets,
                reps: item.reps,
                rest_time_seconds: item.rest_time_seconds,
                exercise_order: item
                    .exercise_order
                    .unwrap_or_else(|| u32::try_from(index).unwrap_or(u32::MAX)),
                created_at: now,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;
    exercises.sort_by_key(|e| e.exercise_order);
    Ok(exercises)
}
