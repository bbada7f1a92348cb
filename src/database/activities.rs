// ABOUTME: Workout session (activity) database operations
// ABOUTME: Start, finish, cancel and completion-date queries feeding the activity summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    format_date, from_db_int, parse_date, parse_timestamp, parse_uuid, to_db_int, Database,
};
use crate::errors::{AppError, AppResult};
use crate::models::{WorkoutActivity, WorkoutActivityExercise};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

impl Database {
    /// Create workout activity tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_activities(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS workout_activities (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                completed INTEGER NOT NULL DEFAULT 0,
                activity_date TEXT NOT NULL,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS workout_activity_exercises (
                id TEXT PRIMARY KEY,
                workout_activity_id TEXT NOT NULL REFERENCES workout_activities(id) ON DELETE CASCADE,
                workout_exercise_id TEXT REFERENCES workout_exercises(id) ON DELETE SET NULL,
                sets_completed INTEGER NOT NULL DEFAULT 0,
                reps_completed INTEGER NOT NULL DEFAULT 0,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema(
            "CREATE INDEX IF NOT EXISTS idx_activities_user_completed_date ON workout_activities(user_id, completed, activity_date)",
        )
        .await?;
        self.execute_schema(
            "CREATE INDEX IF NOT EXISTS idx_activity_exercises_activity ON workout_activity_exercises(workout_activity_id)",
        )
        .await
    }

    /// Insert a new activity row
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_activity(&self, activity: &WorkoutActivity) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO workout_activities (
                id, user_id, workout_id, completed, activity_date, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(activity.id.to_string())
        .bind(activity.user_id.to_string())
        .bind(activity.workout_id.to_string())
        .bind(activity.completed)
        .bind(format_date(activity.activity_date))
        .bind(&activity.notes)
        .bind(activity.created_at.to_rfc3339())
        .bind(activity.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout activity: {e}")))?;
        Ok(())
    }

    /// Get one of a user's activities
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_activity(
        &self,
        user_id: Uuid,
        activity_id: Uuid,
    ) -> AppResult<Option<WorkoutActivity>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, workout_id, completed, activity_date, notes, created_at, updated_at
            FROM workout_activities
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(activity_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout activity: {e}")))?;

        row.map(|r| row_to_activity(&r)).transpose()
    }

    /// Most recently started in-progress activity for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_active_activity(&self, user_id: Uuid) -> AppResult<Option<WorkoutActivity>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, workout_id, completed, activity_date, notes, created_at, updated_at
            FROM workout_activities
            WHERE user_id = $1 AND completed = 0
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get active workout: {e}")))?;

        row.map(|r| row_to_activity(&r)).transpose()
    }

    /// Mark an in-progress activity completed and store its performance rows.
    ///
    /// The update only matches rows with `completed = 0`, so a second finish
    /// writes nothing and returns `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is written in that case
    pub async fn complete_activity(
        &self,
        user_id: Uuid,
        activity_id: Uuid,
        notes: Option<&str>,
        performances: &[WorkoutActivityExercise],
        completed_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut tx = self.begin().await?;

        let result = sqlx::query(
            r"
            UPDATE workout_activities
            SET completed = 1, notes = $1, updated_at = $2
            WHERE id = $3 AND user_id = $4 AND completed = 0
            ",
        )
        .bind(notes)
        .bind(completed_at.to_rfc3339())
        .bind(activity_id.to_string())
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to finish workout: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        for performance in performances {
            sqlx::query(
                r"
                INSERT INTO workout_activity_exercises (
                    id, workout_activity_id, workout_exercise_id, sets_completed,
                    reps_completed, notes, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ",
            )
            .bind(performance.id.to_string())
            .bind(performance.workout_activity_id.to_string())
            .bind(performance.workout_exercise_id.map(|id| id.to_string()))
            .bind(to_db_int(performance.sets_completed))
            .bind(to_db_int(performance.reps_completed))
            .bind(&performance.notes)
            .bind(performance.created_at.to_rfc3339())
            .bind(performance.updated_at.to_rfc3339())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to save exercise performance: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit finished workout: {e}")))?;
        Ok(true)
    }

    /// Delete an in-progress activity; completed activities are left untouched
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_in_progress_activity(
        &self,
        user_id: Uuid,
        activity_id: Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM workout_activities WHERE id = $1 AND user_id = $2 AND completed = 0",
        )
        .bind(activity_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to cancel workout: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Dates of a user's completed activities within `[start, end]`, one entry per activity
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored date is invalid
    pub async fn get_completion_dates(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<NaiveDate>> {
        let rows = sqlx::query(
            r"
            SELECT activity_date
            FROM workout_activities
            WHERE user_id = $1 AND completed = 1 AND activity_date >= $2 AND activity_date <= $3
            ORDER BY activity_date ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(format_date(start))
        .bind(format_date(end))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch workout activity: {e}")))?;

        rows.iter()
            .map(|row| {
                let date: String = row.get("activity_date");
                parse_date(&date)
            })
            .collect()
    }

    /// Performance rows recorded for an activity
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_activity_exercises(
        &self,
        activity_id: Uuid,
    ) -> AppResult<Vec<WorkoutActivityExercise>> {
        let rows = sqlx::query(
            r"
            SELECT id, workout_activity_id, workout_exercise_id, sets_completed,
                   reps_completed, notes, created_at, updated_at
            FROM workout_activity_exercises
            WHERE workout_activity_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(activity_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercise performance: {e}")))?;

        rows.iter().map(row_to_activity_exercise).collect()
    }
}

fn row_to_activity(row: &SqliteRow) -> AppResult<WorkoutActivity> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let workout_id: String = row.get("workout_id");
    let completed: i64 = row.get("completed");
    let activity_date: String = row.get("activity_date");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(WorkoutActivity {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        workout_id: parse_uuid(&workout_id)?,
        completed: completed != 0,
        activity_date: parse_date(&activity_date)?,
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn row_to_activity_exercise(row: &SqliteRow) -> AppResult<WorkoutActivityExercise> {
    let id: String = row.get("id");
    let activity_id: String = row.get("workout_activity_id");
    let exercise_id: Option<String> = row.get("workout_exercise_id");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(WorkoutActivityExercise {
        id: parse_uuid(&id)?,
        workout_activity_id: parse_uuid(&activity_id)?,
        workout_exercise_id: exercise_id.as_deref().map(parse_uuid).transpose()?,
        sets_completed: from_db_int(row.get("sets_completed")),
        reps_completed: from_db_int(row.get("reps_completed")),
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
