// ABOUTME: Shared resource container handed to every route as axum state
// ABOUTME: Wires the database, identity provider, exercise catalog and domain services once at startup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database_plugins::DatabaseProvider;
use crate::external::{ExerciseCatalog, WgerClient, WgerClientConfig};
use crate::identity::{IdentityProvider, LocalIdentityProvider};
use crate::services::{ActivityService, SessionService, WorkoutService};
use crate::utils::http_client::ResilientClient;
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Persistence layer
    pub database: Arc<dyn DatabaseProvider>,
    /// Token signing and validation
    pub auth_manager: Arc<AuthManager>,
    /// Sign-up, sign-in and bearer token resolution
    pub identity: Arc<dyn IdentityProvider>,
    /// Exercise search
    pub catalog: Arc<dyn ExerciseCatalog>,
    /// Workout template operations
    pub workouts: WorkoutService,
    /// Workout session operations
    pub sessions: SessionService,
    /// Activity summary orchestration
    pub activity: ActivityService,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Build every shared resource from configuration
    #[must_use]
    pub fn new(database: Arc<dyn DatabaseProvider>, config: Arc<ServerConfig>) -> Self {
        let auth_manager = Arc::new(AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.token_expiry_hours,
        ));
        let identity: Arc<dyn IdentityProvider> = Arc::new(LocalIdentityProvider::new(
            Arc::clone(&database),
            Arc::clone(&auth_manager),
            config.auth.bcrypt_cost,
        ));
        let catalog: Arc<dyn ExerciseCatalog> = Arc::new(WgerClient::new(
            WgerClientConfig::from(&config.catalog),
            ResilientClient::new(&config.http_client),
        ));

        Self {
            workouts: WorkoutService::new(Arc::clone(&database)),
            sessions: SessionService::new(Arc::clone(&database)),
            activity: ActivityService::new(
                Arc::clone(&database),
                config.activity.max_range_days,
            ),
            database,
            auth_manager,
            identity,
            catalog,
            config,
        }
    }

    /// Replace the exercise catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<dyn ExerciseCatalog>) -> Self {
        self.catalog = catalog;
        self
    }
}
