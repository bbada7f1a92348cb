// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains the resilient outbound HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client configuration and retry helpers
pub mod http_client;
