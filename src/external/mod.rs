// ABOUTME: External API client modules (wger exercise catalog)
// ABOUTME: Provides exercise search integration and caching

// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! External API Clients

pub mod exercise_catalog;

pub use exercise_catalog::{ExerciseCatalog, WgerClient, WgerClientConfig};
