// ABOUTME: User account models and the authenticated session returned on sign-in
// ABOUTME: Password hashes never leave the server; UserProfile is the public projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Lowercased email address
    pub email: String,
    /// bcrypt hash
    pub password_hash: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
    /// Last successful sign-in
    pub last_active: DateTime<Utc>,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier
    pub id: Uuid,
    /// Email address
    pub email: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Credentials for sign-in and sign-up
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    pub password: String,
}

/// Token issued on sign-in or sign-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Token expiry
    pub expires_at: DateTime<Utc>,
    /// Signed-in user
    pub user: UserProfile,
}
