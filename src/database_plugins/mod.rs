// ABOUTME: Database abstraction layer consumed by services and the identity provider
// ABOUTME: Object-safe async trait implemented by the SQLite Database

use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{User, Workout, WorkoutActivity, WorkoutActivityExercise, WorkoutExercise, WorkoutWithExercises};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Core database abstraction trait
///
/// Every read and write is scoped by the owning user id; implementations
/// must never return another user's rows.
#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    // ================================
    // User Management
    // ================================

    /// Create a new user account
    async fn create_user(&self, user: &User) -> AppResult<Uuid>;

    /// Get user by ID
    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>>;

    /// Get user by email address
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Update user's last active timestamp
    async fn update_last_active(&self, user_id: Uuid) -> AppResult<()>;

    // ================================
    // Workout Templates
    // ================================

    /// List a user's workouts, most recently updated first
    async fn list_workouts(&self, user_id: Uuid) -> AppResult<Vec<WorkoutWithExercises>>;

    /// Get one of a user's workouts
    async fn get_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> AppResult<Option<WorkoutWithExercises>>;

    /// Insert a workout with its exercises atomically
    async fn create_workout(&self, workout: &Workout, exercises: &[WorkoutExercise])
        -> AppResult<()>;

    /// Update a workout and optionally replace its exercises; `false` when not found
    async fn update_workout(
        &self,
        workout: &Workout,
        exercises: Option<&[WorkoutExercise]>,
    ) -> AppResult<bool>;

    /// Delete a workout; `false` when not found
    async fn delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> AppResult<bool>;

    // ================================
    // Workout Sessions
    // ================================

    /// Insert a new activity
    async fn create_activity(&self, activity: &WorkoutActivity) -> AppResult<()>;

    /// Get one of a user's activities
    async fn get_activity(
        &self,
        user_id: Uuid,
        activity_id: Uuid,
    ) -> AppResult<Option<WorkoutActivity>>;

    /// Most recent in-progress activity
    async fn get_active_activity(&self, user_id: Uuid) -> AppResult<Option<WorkoutActivity>>;

    /// Complete an in-progress activity; `false` when it was already completed
    async fn complete_activity(
        &self,
        user_id: Uuid,
        activity_id: Uuid,
        notes: Option<&str>,
        performances: &[WorkoutActivityExercise],
        completed_at: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Delete an in-progress activity; `false` when none matched
    async fn delete_in_progress_activity(&self, user_id: Uuid, activity_id: Uuid)
        -> AppResult<bool>;

    /// Completed activity dates in `[start, end]`, one per activity
    async fn get_completion_dates(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<NaiveDate>>;

    /// Performance rows of an activity
    async fn list_activity_exercises(
        &self,
        activity_id: Uuid,
    ) -> AppResult<Vec<WorkoutActivityExercise>>;
}

#[async_trait]
impl DatabaseProvider for Database {
    async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        Self::create_user(self, user).await
    }

    async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Self::get_user(self, user_id).await
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Self::get_user_by_email(self, email).await
    }

    async fn update_last_active(&self, user_id: Uuid) -> AppResult<()> {
        Self::update_last_active(self, user_id).await
    }

    async fn list_workouts(&self, user_id: Uuid) -> AppResult<Vec<WorkoutWithExercises>> {
        Self::list_workouts(self, user_id).await
    }

    async fn get_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> AppResult<Option<WorkoutWithExercises>> {
        Self::get_workout(self, user_id, workout_id).await
    }

    async fn create_workout(
        &self,
        workout: &Workout,
        exercises: &[WorkoutExercise],
    ) -> AppResult<()> {
        Self::create_workout(self, workout, exercises).await
    }

    async fn update_workout(
        &self,
        workout: &Workout,
        exercises: Option<&[WorkoutExercise]>,
    ) -> AppResult<bool> {
        Self::update_workout(self, workout, exercises).await
    }

    async fn delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> AppResult<bool> {
        Self::delete_workout(self, user_id, workout_id).await
    }

    async fn create_activity(&self, activity: &WorkoutActivity) -> AppResult<()> {
        Self::create_activity(self, activity).await
    }

    async fn get_activity(
        &self,
        user_id: Uuid,
        activity_id: Uuid,
    ) -> AppResult<Option<WorkoutActivity>> {
        Self::get_activity(self, user_id, activity_id).await
    }

    async fn get_active_activity(&self, user_id: Uuid) -> AppResult<Option<WorkoutActivity>> {
        Self::get_active_activity(self, user_id).await
    }

    async fn complete_activity(
        &self,
        user_id: Uuid,
        activity_id: Uuid,
        notes: Option<&str>,
        performances: &[WorkoutActivityExercise],
        completed_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        Self::complete_activity(self, user_id, activity_id, notes, performances, completed_at).await
    }

    async fn delete_in_progress_activity(
        &self,
        user_id: Uuid,
        activity_id: Uuid,
    ) -> AppResult<bool> {
        Self::delete_in_progress_activity(self, user_id, activity_id).await
    }

    async fn get_completion_dates(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<NaiveDate>> {
        Self::get_completion_dates(self, user_id, start, end).await
    }

    async fn list_activity_exercises(
        &self,
        activity_id: Uuid,
    ) -> AppResult<Vec<WorkoutActivityExercise>> {
        Self::list_activity_exercises(self, activity_id).await
    }
}
