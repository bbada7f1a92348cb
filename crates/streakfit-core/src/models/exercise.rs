// ABOUTME: Exercise catalog projection returned by the exercise search endpoint
// ABOUTME: Flattens upstream catalog entries into display-ready summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Display-ready catalog exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSummary {
    /// Catalog id, stored as `exercise_id` on workout exercises
    pub id: i64,
    /// Catalog UUID
    pub uuid: Option<String>,
    /// English name, first translation, or a placeholder
    pub name: String,
    /// Catalog category (e.g. "Arms")
    pub category: Option<String>,
    /// Primary muscle names
    pub primary_muscles: Vec<String>,
    /// Secondary muscle names
    pub secondary_muscles: Vec<String>,
    /// Equipment names
    pub equipment: Vec<String>,
    /// Main image, if any
    pub image_url: Option<String>,
    /// English description, if any
    pub description: Option<String>,
}

impl ExerciseSummary {
    /// Case-insensitive match of `term` against name, muscles and equipment
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let contains = |value: &String| value.to_lowercase().contains(&needle);
        contains(&self.name)
            || self.primary_muscles.iter().any(contains)
            || self.secondary_muscles.iter().any(contains)
            || self.equipment.iter().any(contains)
    }
}

/// One page of catalog search results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Total upstream matches
    pub count: u64,
    /// Upstream next-page URL
    pub next: Option<String>,
    /// Upstream previous-page URL
    pub previous: Option<String>,
    /// Filtered results
    pub results: Vec<ExerciseSummary>,
}
