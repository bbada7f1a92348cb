// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Workout templates, sessions and the activity summary orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they extract the caller and the request body and
//! delegate to these services, which own validation and ownership rules.

/// Activity summary orchestration
pub mod activity;

/// Workout session lifecycle
pub mod sessions;

/// Workout template CRUD
pub mod workouts;

pub use activity::ActivityService;
pub use sessions::SessionService;
pub use workouts::{parse_resource_id, WorkoutService};
