// ABOUTME: Test helper modules shared by the integration tests
// ABOUTME: Axum request helpers and a scripted stand-in for the wger API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
pub mod mock_server;
