// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-only configuration with typed sub-configs and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the StreakFit server
//!
//! All settings come from environment variables (optionally seeded from a
//! `.env` file):
//!
//! - **Environment**: ports, database, auth, exercise catalog, activity ranges
//! - **Network**: outbound HTTP timeouts and retries, CORS origins

/// Environment and server configuration
pub mod environment;
/// HTTP client and CORS configuration
pub mod network;

pub use environment::{
    ActivityConfig, AuthConfig, CatalogConfig, DatabaseConfig, Environment, ServerConfig,
};
pub use network::{CorsConfig, HttpClientConfig};
