// ABOUTME: Dependency injection for route handlers
// ABOUTME: Exposes the ServerResources container shared through axum state
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub mod resources;

pub use resources::ServerResources;
