// ABOUTME: Workout session lifecycle: start, resume, finish and cancel
// ABOUTME: The in-progress activity row is the resumable session record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::workouts::parse_resource_id;
use crate::activity::utc_date;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    ActiveSession, CompletedActivity, FinishWorkoutRequest, StartWorkoutRequest,
    StartWorkoutResponse, WorkoutActivity, WorkoutActivityExercise,
};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

const WORKOUT_ACTIVITY: &str = "Workout activity";

/// Starts and completes workout sessions for the calling user
#[derive(Clone)]
pub struct SessionService {
    database: Arc<dyn DatabaseProvider>,
}

impl SessionService {
    /// Create a session service
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseProvider>) -> Self {
        Self { database }
    }

    /// Begin a session of one of the user's workouts, dated today (UTC)
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` or `INVALID_FORMAT` for a bad workout id
    /// and `RESOURCE_NOT_FOUND` when the workout is not the caller's
    pub async fn start_workout(
        &self,
        user_id: Uuid,
        request: &StartWorkoutRequest,
    ) -> AppResult<StartWorkoutResponse> {
        let raw_id = required(request.workout_id.as_deref(), "workout_id")?;
        let workout_id = parse_resource_id("Workout", raw_id)?;

        let workout = self
            .database
            .get_workout(user_id, workout_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;

        let now = Utc::now();
        let activity = WorkoutActivity {
            id: Uuid::new_v4(),
            user_id,
            workout_id,
            completed: false,
            activity_date: utc_date(&now),
            notes: None,
            created_at: now,
            updated_at: now,
        };
        self.database.create_activity(&activity).await?;
        AppLogger::log_session_event(&user_id.to_string(), &activity.id.to_string(), "started");

        Ok(StartWorkoutResponse {
            workout_activity_id: activity.id,
            workout,
        })
    }

    /// The caller's most recent in-progress session, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn active_workout(&self, user_id: Uuid) -> AppResult<Option<ActiveSession>> {
        let Some(activity) = self.database.get_active_activity(user_id).await? else {
            return Ok(None);
        };
        let workout = self
            .database
            .get_workout(user_id, activity.workout_id)
            .await?;
        Ok(workout.map(|workout| ActiveSession { activity, workout }))
    }

    /// Complete a session and record exercise performances.
    ///
    /// Finishing an already-completed session returns the stored result
    /// without writing anything.
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for a session the caller does not own and
    /// `INVALID_INPUT` when a performance names an exercise outside the workout
    pub async fn finish_workout(
        &self,
        user_id: Uuid,
        request: FinishWorkoutRequest,
    ) -> AppResult<CompletedActivity> {
        let raw_id = required(request.workout_activity_id.as_deref(), "workout_activity_id")?;
        let activity_id = parse_resource_id(WORKOUT_ACTIVITY, raw_id)?;
        let activity = self.load_activity(user_id, activity_id).await?;

        if activity.completed {
            return self.completed_activity(activity).await;
        }

        let workout = self
            .database
            .get_workout(user_id, activity.workout_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;
        let known: HashSet<Uuid> = workout.exercises.iter().map(|e| e.id).collect();

        let now = Utc::now();
        let performances = request
            .exercises
            .iter()
            .map(|performance| {
                if !known.contains(&performance.workout_exercise_id) {
                    return Err(AppError::invalid_input(format!(
                        "Exercise {} is not part of this workout",
                        performance.workout_exercise_id
                    )));
                }
                Ok(WorkoutActivityExercise {
                    id: Uuid::new_v4(),
                    workout_activity_id: activity_id,
                    workout_exercise_id: Some(performance.workout_exercise_id),
                    sets_completed: performance.sets_completed,
                    reps_completed: performance.reps_completed,
                    notes: trimmed(performance.notes.as_deref()),
                    created_at: now,
                    updated_at: now,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let notes = trimmed(request.notes.as_deref());
        let written = self
            .database
            .complete_activity(user_id, activity_id, notes.as_deref(), &performances, now)
            .await?;
        if written {
            AppLogger::log_session_event(&user_id.to_string(), &activity_id.to_string(), "finished");
        }

        let stored = self.load_activity(user_id, activity_id).await?;
        self.completed_activity(stored).await
    }

    /// Discard an in-progress session
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for a session the caller does not own and
    /// `INVALID_INPUT` for a session that is already completed
    pub async fn cancel_workout(&self, user_id: Uuid, activity_id: Uuid) -> AppResult<()> {
        let activity = self.load_activity(user_id, activity_id).await?;
        if activity.completed {
            return Err(AppError::invalid_input(
                "Completed workouts cannot be cancelled",
            ));
        }
        if !self
            .database
            .delete_in_progress_activity(user_id, activity_id)
            .await?
        {
            return Err(AppError::not_found(WORKOUT_ACTIVITY));
        }
        AppLogger::log_session_event(&user_id.to_string(), &activity_id.to_string(), "cancelled");
        Ok(())
    }

    async fn load_activity(&self, user_id: Uuid, activity_id: Uuid) -> AppResult<WorkoutActivity> {
        self.database
            .get_activity(user_id, activity_id)
            .await?
            .ok_or_else(|| AppError::not_found(WORKOUT_ACTIVITY))
    }

    async fn completed_activity(&self, activity: WorkoutActivity) -> AppResult<CompletedActivity> {
        let exercises = self.database.list_activity_exercises(activity.id).await?;
        Ok(CompletedActivity {
            activity,
            exercises,
        })
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_field(field))
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}
