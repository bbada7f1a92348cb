// ABOUTME: Identity provider: sign-up, sign-in, sign-out and bearer token resolution
// ABOUTME: Local accounts with bcrypt hashes, JWT access tokens and an in-memory revocation list

//! # Identity
//!
//! Handlers never read session state from globals. The auth middleware
//! resolves the bearer token through an [`IdentityProvider`] and hands the
//! resulting [`AuthResult`] to the handler.

use crate::auth::{hash_password, verify_password, AuthManager, AuthResult};
use crate::constants::auth::{MIN_PASSWORD_LENGTH, TOKEN_TYPE};
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{AuthSession, Credentials, User, UserProfile};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Verifies credentials and bearer tokens
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account and sign it in
    async fn sign_up(&self, credentials: &Credentials) -> AppResult<AuthSession>;

    /// Exchange email and password for an access token
    async fn sign_in(&self, credentials: &Credentials) -> AppResult<AuthSession>;

    /// Revoke the caller's current token
    async fn sign_out(&self, auth: &AuthResult) -> AppResult<()>;

    /// Resolve a bearer token to the calling user
    async fn resolve_user(&self, token: &str) -> AppResult<AuthResult>;

    /// Profile of the calling user
    async fn current_user(&self, auth: &AuthResult) -> AppResult<UserProfile>;
}

/// Identity provider backed by the local users table
pub struct LocalIdentityProvider {
    database: Arc<dyn DatabaseProvider>,
    auth_manager: Arc<AuthManager>,
    bcrypt_cost: u32,
    /// Revoked token ids and when each token would have expired
    revoked_tokens: DashMap<String, DateTime<Utc>>,
}

impl LocalIdentityProvider {
    /// Create a provider
    #[must_use]
    pub fn new(
        database: Arc<dyn DatabaseProvider>,
        auth_manager: Arc<AuthManager>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            database,
            auth_manager,
            bcrypt_cost,
            revoked_tokens: DashMap::new(),
        }
    }

    fn issue_session(&self, user: &User) -> AppResult<AuthSession> {
        let issued = self.auth_manager.generate_token(user)?;
        Ok(AuthSession {
            access_token: issued.token,
            token_type: TOKEN_TYPE.to_owned(),
            expires_at: issued.expires_at,
            user: UserProfile::from(user),
        })
    }

    /// Drop revocations whose tokens have expired on their own
    fn purge_expired_revocations(&self) {
        let now = Utc::now();
        self.revoked_tokens.retain(|_, expires_at| *expires_at > now);
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(&self, credentials: &Credentials) -> AppResult<AuthSession> {
        let email = normalize_email(&credentials.email)?;
        if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let password_hash = hash_password(credentials.password.clone(), self.bcrypt_cost).await?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash,
            created_at: now,
            last_active: now,
        };

        self.database.create_user(&user).await?;
        AppLogger::log_auth_event(&user.id.to_string(), "sign_up", true, None);

        self.issue_session(&user)
    }

    async fn sign_in(&self, credentials: &Credentials) -> AppResult<AuthSession> {
        let email = normalize_email(&credentials.email)?;
        if credentials.password.is_empty() {
            return Err(AppError::missing_field("password"));
        }

        let Some(user) = self.database.get_user_by_email(&email).await? else {
            AppLogger::log_auth_event("unknown", "sign_in", false, Some("unknown email"));
            return Err(AppError::auth_invalid("Invalid email or password"));
        };

        if !verify_password(credentials.password.clone(), user.password_hash.clone()).await? {
            AppLogger::log_auth_event(&user.id.to_string(), "sign_in", false, Some("bad password"));
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        self.database.update_last_active(user.id).await?;
        AppLogger::log_auth_event(&user.id.to_string(), "sign_in", true, None);

        self.issue_session(&user)
    }

    async fn sign_out(&self, auth: &AuthResult) -> AppResult<()> {
        self.purge_expired_revocations();
        self.revoked_tokens
            .insert(auth.token_id.clone(), auth.expires_at);
        AppLogger::log_auth_event(&auth.user_id.to_string(), "sign_out", true, None);
        Ok(())
    }

    async fn resolve_user(&self, token: &str) -> AppResult<AuthResult> {
        let auth = self.auth_manager.authenticate(token)?;
        if self.revoked_tokens.contains_key(&auth.token_id) {
            AppLogger::log_security_event(
                "revoked_token_used",
                "request with a signed-out token",
                Some(&auth.user_id.to_string()),
            );
            return Err(AppError::auth_expired());
        }
        Ok(auth)
    }

    async fn current_user(&self, auth: &AuthResult) -> AppResult<UserProfile> {
        self.database
            .get_user(auth.user_id)
            .await?
            .map(|user| UserProfile::from(&user))
            .ok_or_else(|| AppError::auth_invalid("Account no longer exists"))
    }
}

/// Trim, lowercase and sanity-check an email address
fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::missing_field("email"));
    }
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });
    if !valid || email.contains(char::is_whitespace) {
        return Err(AppError::invalid_format("Email address is not valid"));
    }
    Ok(email)
}
