// ABOUTME: Network configuration types for outbound HTTP clients and CORS
// ABOUTME: Handles timeouts, retry backoff and allowed browser origins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::http_client;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Outbound HTTP client timeout and retry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further attempt
    pub retry_base_delay_ms: u64,
    /// Cap on a single retry delay
    pub retry_max_delay_ms: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http_client::REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: http_client::CONNECT_TIMEOUT_SECS,
            max_retries: http_client::MAX_RETRIES,
            retry_base_delay_ms: http_client::INITIAL_BACKOFF_MS,
            retry_max_delay_ms: 30_000,
        }
    }
}

impl HttpClientConfig {
    /// Load HTTP client configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_secs: env_parse("HTTP_CLIENT_TIMEOUT_SECS", defaults.timeout_secs),
            connect_timeout_secs: env_parse(
                "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            ),
            max_retries: env_parse("HTTP_CLIENT_MAX_RETRIES", defaults.max_retries),
            retry_base_delay_ms: env_parse(
                "HTTP_CLIENT_RETRY_BASE_DELAY_MS",
                defaults.retry_base_delay_ms,
            ),
            retry_max_delay_ms: env_parse(
                "HTTP_CLIENT_RETRY_MAX_DELAY_MS",
                defaults.retry_max_delay_ms,
            ),
        }
    }
}

/// CORS configuration for browser clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` or empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Load CORS configuration from `CORS_ALLOWED_ORIGINS`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            allowed_origins: parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default()),
        }
    }

    /// Whether every origin is allowed
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Read and parse an environment variable, falling back on absence or parse failure
pub(super) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
