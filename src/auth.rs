// ABOUTME: JWT-based user authentication: token issuing, validation and password hashing
// ABOUTME: HS256 access tokens carry a unique jti so individual tokens can be revoked on sign-out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! Access tokens are HS256 JWTs signed with the configured secret. Every
//! token carries a unique `jti`; sign-out revokes that id until the token
//! would have expired anyway (see [`crate::identity`]).

use crate::constants::auth::{JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task;
use tracing::{debug, warn};
use uuid::Uuid;

/// `JWT` validation error with detailed information
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired,
    /// Token signature or claims are invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenExpired => write!(f, "JWT token has expired"),
            Self::TokenInvalid { reason } => write!(f, "JWT token is invalid: {reason}"),
            Self::TokenMalformed { details } => write!(f, "JWT token is malformed: {details}"),
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match error {
            JwtValidationError::TokenExpired => Self::auth_expired(),
            other => Self::auth_invalid(other.to_string()),
        }
    }
}

/// `JWT` claims for user authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Unique token id, used for revocation
    pub jti: String,
    /// Audience (who the token is intended for)
    pub aud: String,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Expiry as a timestamp
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// Authenticated caller, passed explicitly into every protected handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// Authenticated user `ID`
    pub user_id: Uuid,
    /// Email from the token
    pub email: String,
    /// Token id (`jti`)
    pub token_id: String,
    /// Token expiry
    pub expires_at: DateTime<Utc>,
}

/// Freshly issued access token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,
    /// Token id (`jti`)
    pub token_id: String,
    /// Expiry
    pub expires_at: DateTime<Utc>,
}

/// Authentication manager for `JWT` tokens
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
    /// Monotonic counter mixed into token ids
    token_counter: AtomicU64,
}

impl Clone for AuthManager {
    fn clone(&self) -> Self {
        Self {
            encoding_key: self.encoding_key.clone(),
            decoding_key: self.decoding_key.clone(),
            token_expiry_hours: self.token_expiry_hours,
            token_counter: AtomicU64::new(0),
        }
    }
}

impl AuthManager {
    /// Create a new authentication manager from an HMAC secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
            token_counter: AtomicU64::new(0),
        }
    }

    /// Configured token lifetime in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Generate an access token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<IssuedToken> {
        self.generate_token_at(user, Utc::now())
    }

    /// Generate an access token as if issued at `now`
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry overflows the calendar or JWT encoding fails
    pub fn generate_token_at(&self, user: &User, now: DateTime<Utc>) -> AppResult<IssuedToken> {
        let expires_at = Duration::try_hours(self.token_expiry_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::config(format!(
                    "Token expiry of {} hours is out of range",
                    self.token_expiry_hours
                ))
            })?;
        let counter = self.token_counter.fetch_add(1, Ordering::Relaxed);
        let token_id = format!("{}-{counter}", Uuid::new_v4().simple());

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: token_id.clone(),
            aud: JWT_AUDIENCE.to_owned(),
            iss: JWT_ISSUER.to_owned(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken {
            token,
            token_id,
            expires_at,
        })
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if the token is expired, has a bad
    /// signature, names the wrong audience or issuer, or is not a JWT at all
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.set_issuer(&[JWT_ISSUER]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    /// Validate a token and resolve the caller
    ///
    /// # Errors
    ///
    /// Returns an authentication error for any invalid token
    pub fn authenticate(&self, token: &str) -> AppResult<AuthResult> {
        let claims = self.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a valid user id"))?;
        debug!(user.id = %user_id, "Token validated");

        Ok(AuthResult {
            user_id,
            expires_at: claims.expires_at(),
            email: claims.email,
            token_id: claims.jti,
        })
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &JwtError) -> JwtValidationError {
        match e.kind() {
            ErrorKind::ExpiredSignature => JwtValidationError::TokenExpired,
            ErrorKind::InvalidSignature => {
                warn!("JWT token signature verification failed");
                JwtValidationError::TokenInvalid {
                    reason: "Token signature verification failed".into(),
                }
            }
            ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                JwtValidationError::TokenMalformed {
                    details: e.to_string(),
                }
            }
            _ => JwtValidationError::TokenInvalid {
                reason: e.to_string(),
            },
        }
    }
}

/// Hash a password with bcrypt on the blocking pool
///
/// # Errors
///
/// Returns an internal error if hashing fails or the task panics
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Verify a password against a bcrypt hash on the blocking pool
///
/// Malformed hashes verify as `false`.
///
/// # Errors
///
/// Returns an internal error if the blocking task panics
pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
}

/// Extract the token from an `Authorization: Bearer <token>` header value
#[must_use]
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
