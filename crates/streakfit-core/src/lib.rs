// ABOUTME: Core types and constants for the StreakFit workout tracking API
// ABOUTME: Foundation crate with error handling, domain models, and activity streak aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # StreakFit Core
//!
//! Foundation crate providing shared types for the StreakFit server, its API
//! client and the CLI. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Users, workouts, sessions and catalog entries
//! - **activity**: Daily counts, streak statistics and the activity summary

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;

/// Activity aggregation (date counts and streaks)
pub mod activity;
