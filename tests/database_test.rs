// ABOUTME: Tests for the SQLite database layer using file-backed and in-memory pools
// ABOUTME: Covers persistence across reopen, completion date filtering and cascading deletes

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use common::{date, insert_completion, insert_workout};
use streakfit::{
    database::Database,
    database_plugins::DatabaseProvider,
    errors::ErrorCode,
    models::{User, WorkoutActivity},
};
use tempfile::TempDir;
use uuid::Uuid;

fn user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        password_hash: "$2b$04$placeholderplaceholderplaceholderplaceholde".to_owned(),
        created_at: now,
        last_active: now,
    }
}

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("streakfit.db").display());

    let stored = user("persist@example.com");
    {
        let database = Database::new(&url, 2).await.unwrap();
        database.create_user(&stored).await.unwrap();
        let workout = insert_workout(&database, stored.id).await.unwrap();
        insert_completion(&database, stored.id, workout.id, date("2024-03-01"))
            .await
            .unwrap();
        database.close().await;
    }

    let reopened = Database::new(&url, 2).await.unwrap();
    let found = reopened
        .get_user_by_email("persist@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, stored.id);

    let dates = reopened
        .get_completion_dates(stored.id, date("2024-01-01"), date("2024-12-31"))
        .await
        .unwrap();
    assert_eq!(dates, vec![date("2024-03-01")]);
}

#[tokio::test]
async fn test_duplicate_email_is_a_conflict() {
    let database = common::create_test_database().await.unwrap();
    database.create_user(&user("same@example.com")).await.unwrap();

    let err = database
        .create_user(&user("same@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_completion_dates_respect_bounds_and_repeat_per_activity() {
    let database = common::create_test_database().await.unwrap();
    let owner = user("dates@example.com");
    database.create_user(&owner).await.unwrap();
    let workout = insert_workout(database.as_ref(), owner.id).await.unwrap();

    for day in ["2024-02-28", "2024-03-01", "2024-03-01", "2024-03-02"] {
        insert_completion(database.as_ref(), owner.id, workout.id, date(day))
            .await
            .unwrap();
    }

    let dates = database
        .get_completion_dates(owner.id, date("2024-03-01"), date("2024-03-01"))
        .await
        .unwrap();
    assert_eq!(dates, vec![date("2024-03-01"), date("2024-03-01")]);
}

#[tokio::test]
async fn test_second_completion_writes_nothing() {
    let database = common::create_test_database().await.unwrap();
    let owner = user("twice@example.com");
    database.create_user(&owner).await.unwrap();
    let workout = insert_workout(database.as_ref(), owner.id).await.unwrap();

    let now = Utc::now();
    let activity = WorkoutActivity {
        id: Uuid::new_v4(),
        user_id: owner.id,
        workout_id: workout.id,
        completed: false,
        activity_date: date("2024-03-01"),
        notes: None,
        created_at: now,
        updated_at: now,
    };
    database.create_activity(&activity).await.unwrap();
    let in_progress = database.get_active_activity(owner.id).await.unwrap();
    assert_eq!(in_progress.map(|a| a.id), Some(activity.id));

    let first = database
        .complete_activity(owner.id, activity.id, Some("done"), &[], now)
        .await
        .unwrap();
    let second = database
        .complete_activity(owner.id, activity.id, Some("again"), &[], now)
        .await
        .unwrap();
    assert!(first);
    assert!(!second);

    let stored = database
        .get_activity(owner.id, activity.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.completed);
    assert_eq!(stored.notes.as_deref(), Some("done"));
    assert!(database.get_active_activity(owner.id).await.unwrap().is_none());
    assert!(!database
        .delete_in_progress_activity(owner.id, activity.id)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_deleting_workout_removes_its_sessions() {
    let database = common::create_test_database().await.unwrap();
    let owner = user("cascade@example.com");
    database.create_user(&owner).await.unwrap();
    let workout = insert_workout(database.as_ref(), owner.id).await.unwrap();
    insert_completion(database.as_ref(), owner.id, workout.id, date("2024-03-01"))
        .await
        .unwrap();

    assert!(database.delete_workout(owner.id, workout.id).await.unwrap());
    assert!(!database.delete_workout(owner.id, workout.id).await.unwrap());

    let dates = database
        .get_completion_dates(owner.id, date("2024-01-01"), date("2024-12-31"))
        .await
        .unwrap();
    assert!(dates.is_empty());
}

#[tokio::test]
async fn test_closed_pool_reports_database_error() {
    let database = common::create_test_database().await.unwrap();
    database.close().await;

    let err = database.get_user(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::DatabaseError);
}
