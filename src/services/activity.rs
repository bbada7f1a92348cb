// ABOUTME: Activity summary orchestration for the workout calendar heatmap
// ABOUTME: Resolves the date range, loads completions and hands them to the streak aggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::activity::{
    build_activity_response, parse_date_param, utc_date, ActivityResponse, DateRange,
};
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

/// Builds per-day activity counts and streak summaries for a user
#[derive(Clone)]
pub struct ActivityService {
    database: Arc<dyn DatabaseProvider>,
    max_range_days: i64,
}

impl ActivityService {
    /// Create a service limited to ranges of `max_range_days` days
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseProvider>, max_range_days: i64) -> Self {
        Self {
            database,
            max_range_days,
        }
    }

    /// Summary for the caller using today's UTC date
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FORMAT` or `VALUE_OUT_OF_RANGE` for bad date parameters
    /// and `DATABASE_ERROR` when completions cannot be loaded
    pub async fn get_activity_summary(
        &self,
        user_id: Uuid,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> AppResult<ActivityResponse> {
        self.get_activity_summary_at(user_id, start_date, end_date, utc_date(&Utc::now()))
            .await
    }

    /// Summary for the caller as seen on `today`
    ///
    /// # Errors
    ///
    /// See [`Self::get_activity_summary`]
    pub async fn get_activity_summary_at(
        &self,
        user_id: Uuid,
        start_date: Option<&str>,
        end_date: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<ActivityResponse> {
        let start = parse_date_param("start_date", start_date)?;
        let end = parse_date_param("end_date", end_date)?;
        let range = DateRange::resolve(start, end, today)?;

        if range.len_days() > self.max_range_days {
            return Err(AppError::out_of_range(format!(
                "Date range may span at most {} days",
                self.max_range_days
            )));
        }

        let completions = self
            .database
            .get_completion_dates(user_id, range.start, range.end)
            .await
            .inspect_err(|e| error!(user_id = %user_id, "Failed to load workout activity: {e}"))?;

        debug!(
            user_id = %user_id,
            start = %range.start,
            end = %range.end,
            completions = completions.len(),
            "Building activity summary"
        );

        Ok(build_activity_response(&completions, range, today))
    }
}
