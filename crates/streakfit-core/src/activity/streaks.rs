// ABOUTME: Consecutive-day streak calculation over workout completion dates
// ABOUTME: Pure and deterministic; the caller supplies "today" so results are reproducible
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Current and longest runs of consecutive active days
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    /// Length of the run ending today or yesterday, 0 otherwise
    pub current_streak: u32,
    /// Longest run anywhere in the input
    pub longest_streak: u32,
}

/// Compute streak statistics from completion dates.
///
/// Dates may arrive unsorted and may repeat; duplicates collapse to a single
/// active day. A run is still "current" when its last day is today or
/// yesterday, so a user who has not trained yet today keeps their streak.
#[must_use]
pub fn calculate_streaks<I>(dates: I, today: NaiveDate) -> StreakStats
where
    I: IntoIterator<Item = NaiveDate>,
{
    let distinct: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut iter = distinct.iter().copied();
    let Some(first) = iter.next() else {
        return StreakStats::default();
    };

    let mut previous = first;
    let mut run: u32 = 1;
    let mut longest: u32 = 1;

    for date in iter {
        if (date - previous).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
        previous = date;
    }

    // A last date after `today` (clock skew) still counts as current
    let current = if (today - previous).num_days() <= 1 {
        run
    } else {
        0
    };

    StreakStats {
        current_streak: current,
        longest_streak: longest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::activity::DATE_FORMAT;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_single_date_today() {
        let stats = calculate_streaks([d("2024-03-10")], d("2024-03-10"));
        assert_eq!(stats, StreakStats { current_streak: 1, longest_streak: 1 });
    }

    #[test]
    fn test_single_stale_date() {
        let stats = calculate_streaks([d("2024-03-01")], d("2024-03-10"));
        assert_eq!(stats, StreakStats { current_streak: 0, longest_streak: 1 });
    }

    #[test]
    fn test_gap_resets_run() {
        let dates = [d("2024-03-01"), d("2024-03-02"), d("2024-03-04"), d("2024-03-05")];
        let stats = calculate_streaks(dates, d("2024-03-06"));
        assert_eq!(stats, StreakStats { current_streak: 2, longest_streak: 2 });
    }

    #[test]
    fn test_future_last_date_counts_as_current() {
        let stats = calculate_streaks([d("2024-03-11")], d("2024-03-10"));
        assert_eq!(stats.current_streak, 1);
    }
}
