// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for routes, activity ranges, auth and the exercise catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// API base path
    pub const API_BASE: &str = "/api";
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// Service identity used in logs and health responses
pub mod service_names {
    /// Server service name
    pub const STREAKFIT_SERVER: &str = "streakfit-server";
}

/// Activity summary range handling
pub mod activity {
    /// Default lookback when `start_date` is omitted
    pub const DEFAULT_LOOKBACK_DAYS: i64 = 365;
    /// Upper bound on the number of days a single summary may cover
    pub const MAX_RANGE_DAYS: i64 = 3660;
    /// Wire format of calendar dates
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Token and password handling
pub mod auth {
    /// Access token lifetime
    pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;
    /// JWT audience claim
    pub const JWT_AUDIENCE: &str = "streakfit-api";
    /// JWT issuer claim
    pub const JWT_ISSUER: &str = "streakfit";
    /// Minimum password length on sign-up
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Token type reported to clients
    pub const TOKEN_TYPE: &str = "Bearer";
}

/// Exercise catalog (wger) defaults
pub mod catalog {
    /// Public wger API base URL
    pub const WGER_BASE_URL: &str = "https://wger.de/api/v2";
    /// Cached search results lifetime
    pub const CACHE_TTL_SECS: u64 = 300;
    /// Results shown when no search term is given
    pub const DEFAULT_BROWSE_LIMIT: usize = 10;
    /// Page size requested from the catalog
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    /// Largest page a caller may request
    pub const MAX_PAGE_SIZE: u32 = 100;
    /// Fallback display name
    pub const UNNAMED_EXERCISE: &str = "Unnamed Exercise";
    /// wger language id for English
    pub const ENGLISH_LANGUAGE_ID: u32 = 2;
}

/// Outbound HTTP retry defaults
pub mod http_client {
    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Retries after the first attempt
    pub const MAX_RETRIES: u32 = 3;
    /// Delay before the first retry
    pub const INITIAL_BACKOFF_MS: u64 = 1000;
    /// Status codes worth retrying
    pub const RETRYABLE_STATUS_CODES: [u16; 3] = [429, 500, 503];
}
