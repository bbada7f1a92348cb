// ABOUTME: Main library entry point for the StreakFit API server
// ABOUTME: Workout templates, workout sessions, activity streaks and exercise search over REST
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # StreakFit
//!
//! Backend for a workout tracking app. Users build workout templates from a
//! public exercise catalog, perform them as sessions, and see a calendar of
//! completed workouts with their current and longest daily streaks.
//!
//! ## Architecture
//!
//! - **`streakfit-core`**: errors, models, constants and the pure streak
//!   aggregator, re-exported here
//! - **Database**: `SQLite` persistence behind the `DatabaseProvider` trait
//! - **Services**: validation and ownership rules for workouts, sessions and
//!   the activity summary
//! - **Routes**: thin axum handlers authenticated by bearer tokens
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use streakfit::config::ServerConfig;
//! use streakfit::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("StreakFit configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

pub use streakfit_core::{activity, constants, errors, models};

/// JWT issuance and validation, password hashing
pub mod auth;

/// Typed API client with an explicit session context
pub mod client;

/// Environment-based configuration
pub mod config;

/// Shared resources handed to route handlers
pub mod context;

/// `SQLite` persistence
pub mod database;

/// Database abstraction trait
pub mod database_plugins;

/// External API clients
pub mod external;

/// Sign-up, sign-in and token resolution
pub mod identity;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// HTTP routes
pub mod routes;

/// Domain services
pub mod services;

/// Shared utilities
pub mod utils;
