// ABOUTME: Calendar helpers for activity summaries: date ranges, tallies and zero-filling
// ABOUTME: Also maps a day's workout count onto the heatmap intensity bucket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::activity::{DATE_FORMAT, DEFAULT_LOOKBACK_DAYS};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-day completed workout counts, keyed by UTC calendar date
pub type DateCountMap = BTreeMap<NaiveDate, u32>;

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day, inclusive
    pub start: NaiveDate,
    /// Last day, inclusive
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`
    ///
    /// # Errors
    ///
    /// Returns a `VALUE_OUT_OF_RANGE` error when `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::out_of_range(format!(
                "start_date {start} is after end_date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Resolve optional bounds: `end` defaults to `today`, `start` to 365 days before `end`
    ///
    /// # Errors
    ///
    /// Returns a `VALUE_OUT_OF_RANGE` error when the resolved start is after the end
    /// or the default start would fall before the first representable date
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> AppResult<Self> {
        let end = end.unwrap_or(today);
        let start = match start {
            Some(start) => start,
            None => end
                .checked_sub_days(Days::new(DEFAULT_LOOKBACK_DAYS.unsigned_abs()))
                .ok_or_else(|| {
                    AppError::out_of_range(format!("end_date {end} is too early for a default range"))
                })?,
        };
        Self::new(start, end)
    }

    /// Number of calendar days covered, both ends included
    #[must_use]
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `date` falls inside the range
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterate every day in the range in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

/// Parse an optional `YYYY-MM-DD` query value
///
/// Only four-digit years are accepted; stored dates compare as text.
///
/// # Errors
///
/// Returns an `INVALID_FORMAT` error naming `field` when the value is not a valid date
pub fn parse_date_param(field: &str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .filter(|date| (0..=9999).contains(&date.year()))
            .map(Some)
            .ok_or_else(|| AppError::invalid_format(format!("{field} must be a YYYY-MM-DD date"))),
    }
}

/// Reduce a timestamp in any offset to its UTC calendar date
#[must_use]
pub fn utc_date<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> NaiveDate {
    timestamp.with_timezone(&Utc).date_naive()
}

/// Tally raw completion dates, one increment per completion
#[must_use]
pub fn count_by_date<I>(dates: I) -> DateCountMap
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut counts = DateCountMap::new();
    for date in dates {
        *counts.entry(date).or_insert(0) += 1;
    }
    counts
}

/// Insert a zero for every day of `range` missing from `counts`.
///
/// Dates outside the range are dropped so the result has exactly
/// `range.len_days()` keys.
#[must_use]
pub fn zero_fill(counts: &DateCountMap, range: DateRange) -> DateCountMap {
    range
        .days()
        .map(|day| (day, counts.get(&day).copied().unwrap_or(0)))
        .collect()
}

/// Heatmap intensity bucket for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// No workouts
    None,
    /// One workout
    Low,
    /// Two or three workouts
    Medium,
    /// Four or more workouts
    High,
}

impl ActivityLevel {
    /// Bucket a day's workout count
    #[must_use]
    pub const fn from_count(count: u32) -> Self {
        match count {
            0 => Self::None,
            1 => Self::Low,
            2 | 3 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Numeric level, 0 to 3
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Character drawn for this level in a text heatmap
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::None => '.',
            Self::Low => '-',
            Self::Medium => '+',
            Self::High => '#',
        }
    }
}

/// Render a zero-filled map as a text heatmap, one row per week.
///
/// Each row starts with the date of its first day; rows hold up to seven days.
#[must_use]
pub fn heatmap_rows(counts: &DateCountMap) -> Vec<String> {
    let days: Vec<_> = counts.iter().collect();
    days.chunks(7)
        .filter_map(|week| {
            let (first, _) = week.first()?;
            let cells: String = week
                .iter()
                .map(|(_, count)| ActivityLevel::from_count(**count).glyph())
                .collect();
            Some(format!("{} {cells}", first.format(DATE_FORMAT)))
        })
        .collect()
}
