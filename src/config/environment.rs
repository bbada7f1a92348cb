// ABOUTME: Environment-based server configuration loaded at startup
// ABOUTME: Database, auth, exercise catalog, activity range and HTTP settings with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::network::{CorsConfig, HttpClientConfig};
use crate::constants::{activity, auth, catalog, ports};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};
use uuid::Uuid;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Automated tests
    Testing,
    /// Production deployment
    Production,
}

impl Environment {
    /// Parse from string, defaulting to development
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Whether this is a production deployment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Testing => write!(f, "testing"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Per-request timeout applied by the HTTP stack
    pub request_timeout_secs: u64,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Exercise catalog configuration
    pub catalog: CatalogConfig,
    /// Activity summary configuration
    pub activity: ActivityConfig,
    /// Outbound HTTP client configuration
    pub http_client: HttpClientConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLite` URL, e.g. `sqlite:./data/streakfit.db` or `sqlite::memory:`
    pub url: String,
    /// Connection pool size
    pub max_connections: u32,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign access tokens
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Access token lifetime in hours
    pub token_expiry_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

/// Exercise catalog configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog API base URL
    pub base_url: String,
    /// Search result cache lifetime in seconds
    pub cache_ttl_secs: u64,
    /// Page size requested when the caller gives none
    pub default_page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: catalog::WGER_BASE_URL.to_owned(),
            cache_ttl_secs: catalog::CACHE_TTL_SECS,
            default_page_size: catalog::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Activity summary configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Widest range a single summary may cover, in days
    pub max_range_days: i64,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            max_range_days: activity::MAX_RANGE_DAYS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a value is present but invalid,
    /// or when a production deployment lacks `JWT_SECRET`
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let config = Self {
            http_port: parse_var("HTTP_PORT", ports::DEFAULT_HTTP_PORT)?,
            environment,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 30)?,
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", "sqlite:./data/streakfit.db"),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            },
            auth: AuthConfig {
                jwt_secret: jwt_secret_from_env(environment)?,
                token_expiry_hours: parse_var(
                    "JWT_EXPIRY_HOURS",
                    auth::DEFAULT_TOKEN_EXPIRY_HOURS,
                )?,
                bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            },
            catalog: CatalogConfig {
                base_url: env_var_or("WGER_BASE_URL", catalog::WGER_BASE_URL),
                cache_ttl_secs: parse_var("CATALOG_CACHE_TTL_SECS", catalog::CACHE_TTL_SECS)?,
                default_page_size: parse_var(
                    "CATALOG_PAGE_SIZE",
                    catalog::DEFAULT_PAGE_SIZE,
                )?,
            },
            activity: ActivityConfig {
                max_range_days: parse_var("ACTIVITY_MAX_RANGE_DAYS", activity::MAX_RANGE_DAYS)?,
            },
            http_client: HttpClientConfig::from_env(),
            cors: CorsConfig::from_env(),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the first invalid value
    pub fn validate(&self) -> AppResult<()> {
        if self.auth.jwt_secret.len() < 32 {
            return Err(AppError::config(
                "JWT_SECRET must be at least 32 characters long",
            ));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(AppError::config("BCRYPT_COST must be between 4 and 31"));
        }
        if self.auth.token_expiry_hours <= 0 {
            return Err(AppError::config("JWT_EXPIRY_HOURS must be positive"));
        }
        if self.activity.max_range_days < 1 {
            return Err(AppError::config("ACTIVITY_MAX_RANGE_DAYS must be at least 1"));
        }
        if !self.database.url.starts_with("sqlite:") {
            return Err(AppError::config("DATABASE_URL must be a sqlite: URL"));
        }
        if self.catalog.default_page_size == 0 || self.catalog.default_page_size > catalog::MAX_PAGE_SIZE
        {
            return Err(AppError::config(format!(
                "CATALOG_PAGE_SIZE must be between 1 and {}",
                catalog::MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "StreakFit Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Token Expiry: {}h\n\
             - Exercise Catalog: {} (cache {}s)\n\
             - Activity Max Range: {} days\n\
             - HTTP Retries: {} (base delay {}ms)\n\
             - CORS: {}",
            self.http_port,
            self.environment,
            self.database.url,
            self.auth.token_expiry_hours,
            self.catalog.base_url,
            self.catalog.cache_ttl_secs,
            self.activity.max_range_days,
            self.http_client.max_retries,
            self.http_client.retry_base_delay_ms,
            if self.cors.allows_any() {
                "any origin".to_owned()
            } else {
                self.cors.allowed_origins.join(", ")
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, rejecting values that are present but malformed
fn parse_var<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}

/// Resolve the token signing secret; only non-production runs may fall back to a random one
fn jwt_secret_from_env(environment: Environment) -> AppResult<String> {
    if let Ok(secret) = env::var("JWT_SECRET") {
        return Ok(secret);
    }
    if environment.is_production() {
        return Err(AppError::config("JWT_SECRET is required in production"));
    }
    warn!("JWT_SECRET not set; generating an ephemeral secret (tokens will not survive restarts)");
    Ok(format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    ))
}
