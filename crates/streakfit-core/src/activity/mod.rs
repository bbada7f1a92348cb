// ABOUTME: Activity aggregation: daily workout counts, streaks and the summary response
// ABOUTME: Pure functions with no I/O; the server supplies completion dates and "today"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Activity Aggregation
//!
//! Turns a user's raw workout completion dates into the calendar heatmap data
//! and streak statistics served by `GET /api/workouts/activity`.
//!
//! Duplicate same-day completions count once toward `active_days` and
//! streaks, but every completion is counted in the per-day map and in
//! `total_workouts`.

/// Date ranges, tallies, zero-filling and heatmap levels
pub mod calendar;
/// Consecutive-day streak calculation
pub mod streaks;

pub use calendar::{
    count_by_date, heatmap_rows, parse_date_param, utc_date, zero_fill, ActivityLevel, DateCountMap,
    DateRange,
};
pub use streaks::{calculate_streaks, StreakStats};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Aggregate numbers shown above the activity calendar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Every completed workout in the range
    pub total_workouts: u32,
    /// Distinct days with at least one completed workout
    pub active_days: u32,
    /// Run of consecutive days ending today or yesterday
    pub current_streak: u32,
    /// Longest run of consecutive days in the range
    pub longest_streak: u32,
}

/// Body of `GET /api/workouts/activity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityResponse {
    /// Count for every day in the requested range, zeros included
    pub data: DateCountMap,
    /// Totals and streaks
    pub summary: ActivitySummary,
}

/// Build the full activity response for `range` from raw completion dates.
///
/// Dates outside `range` are ignored.
#[must_use]
pub fn build_activity_response(
    completions: &[NaiveDate],
    range: DateRange,
    today: NaiveDate,
) -> ActivityResponse {
    let in_range: Vec<_> = completions
        .iter()
        .copied()
        .filter(|date| range.contains(*date))
        .collect();

    let counts = count_by_date(in_range.iter().copied());
    let distinct: BTreeSet<_> = in_range.iter().copied().collect();
    let streaks = calculate_streaks(distinct.iter().copied(), today);

    let total_workouts = u32::try_from(in_range.len()).unwrap_or(u32::MAX);
    let active_days = u32::try_from(distinct.len()).unwrap_or(u32::MAX);

    ActivityResponse {
        data: zero_fill(&counts, range),
        summary: ActivitySummary {
            total_workouts,
            active_days,
            current_streak: streaks.current_streak,
            longest_streak: streaks.longest_streak,
        },
    }
}
