// ABOUTME: Tests for environment-based configuration loading and validation
// ABOUTME: Runs serially because each test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use streakfit::config::{Environment, HttpClientConfig, ServerConfig};
use streakfit::errors::ErrorCode;

const VARS: [&str; 11] = [
    "ENVIRONMENT",
    "HTTP_PORT",
    "DATABASE_URL",
    "JWT_SECRET",
    "JWT_EXPIRY_HOURS",
    "BCRYPT_COST",
    "WGER_BASE_URL",
    "ACTIVITY_MAX_RANGE_DAYS",
    "CATALOG_PAGE_SIZE",
    "HTTP_CLIENT_MAX_RETRIES",
    "CORS_ALLOWED_ORIGINS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_in_development() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.http_port, 8081);
    assert_eq!(config.activity.max_range_days, 3660);
    assert_eq!(config.catalog.base_url, "https://wger.de/api/v2");
    assert_eq!(config.catalog.default_page_size, 20);
    assert_eq!(config.http_client.max_retries, 3);
    assert!(config.auth.jwt_secret.len() >= 32);
    assert!(config.cors.allows_any());
}

#[test]
#[serial]
fn test_values_read_from_environment() {
    clear_env();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("JWT_SECRET", "0123456789abcdef0123456789abcdef");
    env::set_var("BCRYPT_COST", "4");
    env::set_var("ACTIVITY_MAX_RANGE_DAYS", "400");
    env::set_var("HTTP_CLIENT_MAX_RETRIES", "1");
    env::set_var("CORS_ALLOWED_ORIGINS", "http://localhost:5173,https://app.example.com");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 9090);
    assert_eq!(config.database.url, "sqlite::memory:");
    assert_eq!(config.auth.bcrypt_cost, 4);
    assert_eq!(config.activity.max_range_days, 400);
    assert_eq!(config.http_client.max_retries, 1);
    assert_eq!(config.cors.allowed_origins.len(), 2);
    assert!(!config.cors.allows_any());
}

#[test]
#[serial]
fn test_malformed_value_is_a_config_error() {
    clear_env();
    env::set_var("HTTP_PORT", "eighty");

    let err = ServerConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(err.code, ErrorCode::ConfigError);
    assert!(err.message.contains("HTTP_PORT"));
}

#[test]
#[serial]
fn test_production_requires_jwt_secret() {
    clear_env();
    env::set_var("ENVIRONMENT", "production");

    let missing = ServerConfig::from_env();
    env::set_var("JWT_SECRET", "too-short");
    let short = ServerConfig::from_env();
    clear_env();

    assert_eq!(missing.unwrap_err().code, ErrorCode::ConfigError);
    assert_eq!(short.unwrap_err().code, ErrorCode::ConfigError);
}

#[test]
#[serial]
fn test_out_of_range_page_size_rejected() {
    clear_env();
    env::set_var("CATALOG_PAGE_SIZE", "0");

    let result = ServerConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_http_client_falls_back_on_bad_values() {
    clear_env();
    env::set_var("HTTP_CLIENT_MAX_RETRIES", "many");

    let config = HttpClientConfig::from_env();
    clear_env();

    assert_eq!(config, HttpClientConfig::default());
}
