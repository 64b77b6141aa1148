//! Signed identity tokens
//!
//! HS256 JWTs carrying the subject id and email. A token is accepted only
//! while `iat <= now < exp` and its signature verifies against the process
//! secret. Expiry is checked here rather than by `jsonwebtoken` so that the
//! window is half-open, has no leeway, and can be evaluated at any instant.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,     // Subject (identity id)
    pub email: String, // Login email at issue time
    pub iat: i64,      // Issued at (UTC seconds)
    pub exp: i64,      // Expiration time (UTC seconds)
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Bad structure, bad signature, wrong algorithm or inconsistent claims
    #[error("invalid token")]
    Invalid,

    /// Structurally valid and correctly signed, but past `exp`
    #[error("token expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Issues and validates tokens with a read-only, process-wide secret
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    validity: Duration,
}

impl TokenCodec {
    pub const DEFAULT_VALIDITY_HOURS: i64 = 24;

    pub fn new(secret: &[u8], validity: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            validity,
        }
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    pub fn issue(&self, subject_id: Uuid, email: &str) -> Result<String, TokenError> {
        self.issue_at(subject_id, email, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: subject_id,
            email: email.to_string(),
            iat,
            exp: iat + self.validity.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Invalid)?
            .claims;

        let now = now.timestamp();
        if claims.exp <= claims.iat || now < claims.iat {
            return Err(TokenError::Invalid);
        }
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}
