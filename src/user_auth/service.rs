use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use super::password::{CredentialHasher, HashingError};
use super::token::{TokenCodec, TokenError};
use crate::account::{IdentityStore, NewIdentity, UserView};
use crate::db::StoreError;

/// User Registration Request
#[derive(Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "a@x.com")]
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[schema(example = "p1")]
    #[validate(length(min = 1, max = 128, message = "must be 1-128 characters"))]
    pub password: String,
}

/// User Login Request
#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "a@x.com")]
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[schema(example = "p1")]
    #[validate(length(min = 1, max = 128, message = "must be 1-128 characters"))]
    pub password: String,
}

// Requests are never logged with their password.
impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Auth Response (token + public user view)
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("email already registered")]
    EmailTaken,

    /// Unknown email and wrong password are the same error on purpose
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Hashing(#[from] HashingError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Storage(StoreError),
}

impl From<StoreError> for AuthServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(_) => AuthServiceError::EmailTaken,
            other => AuthServiceError::Storage(other),
        }
    }
}

pub struct UserAuthService {
    identities: Arc<dyn IdentityStore>,
    hasher: CredentialHasher,
    tokens: Arc<TokenCodec>,
    // Verified against when the email is unknown, so both login failures cost the same
    dummy_hash: Arc<str>,
}

impl UserAuthService {
    pub fn new(
        identities: Arc<dyn IdentityStore>,
        hasher: CredentialHasher,
        tokens: Arc<TokenCodec>,
    ) -> Result<Self, HashingError> {
        let dummy_hash = hasher.hash("stockroom-timing-equalizer")?.into();
        Ok(Self {
            identities,
            hasher,
            tokens,
            dummy_hash,
        })
    }

    /// Register a new identity and issue its first token
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AuthServiceError> {
        let RegisterRequest { email, password } = req;

        // 1. Hash password
        let password_hash = self.hash_blocking(password).await?;

        // 2. Insert; the unique email index rejects duplicates atomically
        let identity = self
            .identities
            .insert(NewIdentity {
                email,
                password_hash,
            })
            .await?;
        tracing::info!(user_id = %identity.id, "Identity registered");

        // 3. Issue token
        let token = self.tokens.issue(identity.id, &identity.email)?;

        Ok(AuthResponse {
            token,
            user: identity.into(),
        })
    }

    /// Check credentials and issue a token
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AuthServiceError> {
        let LoginRequest { email, password } = req;

        // 1. Find identity by email
        let identity = self.identities.find_by_email(&email).await?;

        // 2. Verify password (against the dummy hash when the email is unknown)
        let stored_hash: Arc<str> = match &identity {
            Some(i) => i.password_hash.as_str().into(),
            None => self.dummy_hash.clone(),
        };
        let verified = match self.verify_blocking(password, stored_hash).await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        };

        let identity = match identity {
            Some(identity) if verified => identity,
            _ => return Err(AuthServiceError::InvalidCredentials),
        };

        // 3. Issue token
        let token = self.tokens.issue(identity.id, &identity.email)?;
        tracing::info!(user_id = %identity.id, "Login succeeded");

        Ok(AuthResponse {
            token,
            user: identity.into(),
        })
    }

    // Argon2 is CPU-bound; keep it off the async worker threads.
    async fn hash_blocking(&self, password: String) -> Result<String, HashingError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| HashingError::new(e.to_string()))?
    }

    async fn verify_blocking(&self, password: String, hash: Arc<str>) -> Result<bool, HashingError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| HashingError::new(e.to_string()))
    }
}
