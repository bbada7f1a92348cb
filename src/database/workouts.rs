// ABOUTME: Workout template database operations
// ABOUTME: Owner-scoped CRUD for workouts and their ordered exercises, with transactional writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{from_db_int, parse_timestamp, parse_uuid, to_db_int, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Workout, WorkoutExercise, WorkoutWithExercises};
use sqlx::{sqlite::SqliteRow, Row, Sqlite, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

impl Database {
    /// Create workout and workout exercise tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL CHECK (length(trim(name)) > 0),
                description TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_id INTEGER NOT NULL,
                exercise_name TEXT NOT NULL,
                sets INTEGER NOT NULL CHECK (sets >= 0),
                reps INTEGER NOT NULL CHECK (reps >= 0),
                rest_time_seconds INTEGER NOT NULL CHECK (rest_time_seconds >= 0),
                exercise_order INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema(
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_updated ON workouts(user_id, updated_at)",
        )
        .await?;
        self.execute_schema(
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout ON workout_exercises(workout_id, exercise_order)",
        )
        .await
    }

    /// List a user's workouts, most recently updated first
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be decoded
    pub async fn list_workouts(&self, user_id: Uuid) -> AppResult<Vec<WorkoutWithExercises>> {
        let workout_rows = sqlx::query(
            r"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM workouts
            WHERE user_id = $1
            ORDER BY updated_at DESC, created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        let exercise_rows = sqlx::query(
            r"
            SELECT we.id, we.workout_id, we.exercise_id, we.exercise_name, we.sets, we.reps,
                   we.rest_time_seconds, we.exercise_order, we.created_at
            FROM workout_exercises we
            JOIN workouts w ON w.id = we.workout_id
            WHERE w.user_id = $1
            ORDER BY we.exercise_order ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workout exercises: {e}")))?;

        let mut exercises_by_workout: HashMap<Uuid, Vec<WorkoutExercise>> = HashMap::new();
        for row in &exercise_rows {
            let exercise = row_to_workout_exercise(row)?;
            exercises_by_workout
                .entry(exercise.workout_id)
                .or_default()
                .push(exercise);
        }

        workout_rows
            .iter()
            .map(|row| {
                let workout = row_to_workout(row)?;
                let exercises = exercises_by_workout.remove(&workout.id).unwrap_or_default();
                Ok(WorkoutWithExercises { workout, exercises })
            })
            .collect()
    }

    /// Get one of a user's workouts with its exercises
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be decoded
    pub async fn get_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> AppResult<Option<WorkoutWithExercises>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM workouts
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let workout = row_to_workout(&row)?;

        let exercise_rows = sqlx::query(
            r"
            SELECT id, workout_id, exercise_id, exercise_name, sets, reps,
                   rest_time_seconds, exercise_order, created_at
            FROM workout_exercises
            WHERE workout_id = $1
            ORDER BY exercise_order ASC
            ",
        )
        .bind(workout_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout exercises: {e}")))?;

        let exercises = exercise_rows
            .iter()
            .map(row_to_workout_exercise)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Some(WorkoutWithExercises { workout, exercises }))
    }

    /// Insert a workout and its exercises atomically
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written in that case
    pub async fn create_workout(
        &self,
        workout: &Workout,
        exercises: &[WorkoutExercise],
    ) -> AppResult<()> {
        let mut tx = self.begin().await?;

        sqlx::query(
            r"
            INSERT INTO workouts (id, user_id, name, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(workout.id.to_string())
        .bind(workout.user_id.to_string())
        .bind(&workout.name)
        .bind(&workout.description)
        .bind(workout.created_at.to_rfc3339())
        .bind(workout.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        insert_workout_exercises(&mut tx, exercises).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit workout: {e}")))
    }

    /// Update a workout's fields and optionally replace its exercises atomically
    ///
    /// Returns `false` when the workout does not exist or is not owned by
    /// `workout.user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is written in that case
    pub async fn update_workout(
        &self,
        workout: &Workout,
        exercises: Option<&[WorkoutExercise]>,
    ) -> AppResult<bool> {
        let mut tx = self.begin().await?;

        let result = sqlx::query(
            r"
            UPDATE workouts
            SET name = $1, description = $2, updated_at = $3
            WHERE id = $4 AND user_id = $5
            ",
        )
        .bind(&workout.name)
        .bind(&workout.description)
        .bind(workout.updated_at.to_rfc3339())
        .bind(workout.id.to_string())
        .bind(workout.user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to update workout: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        if let Some(exercises) = exercises {
            sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
                .bind(workout.id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::database(format!("Failed to replace workout exercises: {e}"))
                })?;
            insert_workout_exercises(&mut tx, exercises).await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit workout update: {e}")))?;
        Ok(true)
    }

    /// Delete a user's workout; exercises and sessions cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(workout_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete workout: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Start a transaction
    pub(super) async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
    }
}

async fn insert_workout_exercises(
    tx: &mut Transaction<'static, Sqlite>,
    exercises: &[WorkoutExercise],
) -> AppResult<()> {
    for exercise in exercises {
        sqlx::query(
            r"
            INSERT INTO workout_exercises (
                id, workout_id, exercise_id, exercise_name, sets, reps,
                rest_time_seconds, exercise_order, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(exercise.id.to_string())
        .bind(exercise.workout_id.to_string())
        .bind(exercise.exercise_id)
        .bind(&exercise.exercise_name)
        .bind(to_db_int(exercise.sets))
        .bind(to_db_int(exercise.reps))
        .bind(to_db_int(exercise.rest_time_seconds))
        .bind(to_db_int(exercise.exercise_order))
        .bind(exercise.created_at.to_rfc3339())
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert workout exercise: {e}")))?;
    }
    Ok(())
}

fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Workout {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        name: row.get("name"),
        description: row.get("description"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn row_to_workout_exercise(row: &SqliteRow) -> AppResult<WorkoutExercise> {
    let id: String = row.get("id");
    let workout_id: String = row.get("workout_id");
    let created_at: String = row.get("created_at");

    Ok(WorkoutExercise {
        id: parse_uuid(&id)?,
        workout_id: parse_uuid(&workout_id)?,
        exercise_id: row.get("exercise_id"),
        exercise_name: row.get("exercise_name"),
        sets: from_db_int(row.get("sets")),
        reps: from_db_int(row.get("reps")),
        rest_time_seconds: from_db_int(row.get("rest_time_seconds")),
        exercise_order: from_db_int(row.get("exercise_order")),
        created_at: parse_timestamp(&created_at)?,
    })
}
