//! Authentication service.
//!
//! Account registration, credential login and JWT issuance/verification.
//! Password hashing itself lives in the `Password` value object.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Well-formed argon2 hash that matches no password. Verified against
/// when the username is unknown so both paths pay the hashing cost.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i32,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "bearer")
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account after checking username and email are free.
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        role: UserRole,
    ) -> AppResult<User>;

    /// Check credentials and issue an access token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify a JWT and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn issue_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
        role: UserRole,
    ) -> AppResult<User> {
        let users = self.uow.users();

        if users.find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }
        if users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = users.create(username, email, password_hash, role).await?;

        tracing::info!(user_id = user.id, role = %user.role, "Account registered");
        Ok(user)
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user = self.uow.users().find_by_username(&username).await?;

        let stored = Password::from_hash(
            user.as_ref()
                .map(|u| u.password_hash.clone())
                .unwrap_or_else(|| DUMMY_HASH.to_string()),
        );
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => issue_token(&user, &self.config),
            _ => {
                tracing::debug!(%username, "Rejected login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(data.claims)
    }
}
