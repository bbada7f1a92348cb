// ABOUTME: SQLite database management: connection pool, schema migrations and row helpers
// ABOUTME: Users, workout templates, workout sessions and per-exercise performance storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! Schema is created with `CREATE TABLE IF NOT EXISTS` on connect. Ids are
//! UUID strings, timestamps RFC 3339 strings and `activity_date` a
//! `YYYY-MM-DD` string, so date range filters compare lexicographically.

mod activities;
mod users;
mod workouts;

use crate::constants::activity::DATE_FORMAT;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

/// Database manager for users, workouts and activities
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a
    /// migration fails
    pub async fn new(database_url: &str, max_connections: u32) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");

        // Ensure SQLite creates the database file if it doesn't exist
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid DATABASE_URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every in-memory connection is a separate database, so keep exactly one alive
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database.in_memory = in_memory, "Database ready");

        Ok(db)
    }

    /// Close every pooled connection; subsequent queries fail
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index cannot be created
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_workouts().await?;
        self.migrate_activities().await?;
        Ok(())
    }

    /// Execute one schema statement
    async fn execute_schema(&self, statement: &str) -> AppResult<()> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        Ok(())
    }
}

/// Parse a stored UUID column
pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::internal(format!("Invalid stored id: {e}")))
}

/// Parse a stored RFC 3339 timestamp column
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))
}

/// Parse a stored `YYYY-MM-DD` column
pub(crate) fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| AppError::internal(format!("Invalid stored date: {e}")))
}

/// Format a date for storage
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Convert an unsigned count to an `SQLite` integer
pub(crate) fn to_db_int(value: u32) -> i64 {
    i64::from(value)
}

/// Convert a stored integer to an unsigned count, clamping negatives to zero
pub(crate) fn from_db_int(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
