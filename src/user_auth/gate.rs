//! Auth gate: turns an inbound `Authorization` header into a verified identity.
//!
//! The check is a linear state machine:
//!
//! ```text
//! Unauthenticated ──header present──▶ Extracted ──token valid──▶ Validated
//!        │                               │
//!        └── absent / malformed ─────────┴── invalid / expired ──▶ Rejected
//! ```
//!
//! Each rejection branch is a distinct [`GateRejection`]; the HTTP layer maps
//! all of them to the same unauthorized response.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use super::token::{Claims, TokenCodec, TokenError};

/// Scheme literal expected before the token (case-sensitive)
pub const BEARER_SCHEME: &str = "Bearer";

/// Verified caller identity, placed in request extensions by the gate.
/// Handlers receive it typed; there is no untyped context lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub subject_id: Uuid,
    pub email: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.sub,
            email: claims.email,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GateRejection {
    #[error("missing Authorization header")]
    MissingCredential,

    #[error("malformed Authorization header")]
    MalformedCredential,

    #[error("token rejected: {0}")]
    Unauthorized(#[from] TokenError),
}

#[derive(Debug)]
pub enum GateState<'a> {
    Unauthenticated(Option<&'a HeaderValue>),
    Extracted(&'a str),
    Validated(AuthenticatedUser),
    Rejected(GateRejection),
}

impl<'a> GateState<'a> {
    pub fn start(headers: &'a HeaderMap) -> Self {
        Self::Unauthenticated(headers.get(AUTHORIZATION))
    }

    /// Advance one state. Terminal states are returned unchanged.
    pub fn step(self, codec: &TokenCodec) -> Self {
        match self {
            Self::Unauthenticated(None) => Self::Rejected(GateRejection::MissingCredential),
            Self::Unauthenticated(Some(value)) => match bearer_token(value) {
                Some(token) => Self::Extracted(token),
                None => Self::Rejected(GateRejection::MalformedCredential),
            },
            Self::Extracted(token) => match codec.validate(token) {
                Ok(claims) => Self::Validated(claims.into()),
                Err(e) => Self::Rejected(e.into()),
            },
            terminal => terminal,
        }
    }
}

/// `<scheme> <token>`, split on single spaces into exactly two parts
fn bearer_token(value: &HeaderValue) -> Option<&str> {
    let raw = value.to_str().ok()?;
    let parts: Vec<&str> = raw.split(' ').collect();
    match parts.as_slice() {
        [scheme, token] if *scheme == BEARER_SCHEME => Some(token),
        _ => None,
    }
}

/// Run the gate to completion
pub fn authenticate(
    headers: &HeaderMap,
    codec: &TokenCodec,
) -> Result<AuthenticatedUser, GateRejection> {
    let mut state = GateState::start(headers);
    loop {
        state = match state.step(codec) {
            GateState::Validated(user) => return Ok(user),
            GateState::Rejected(rejection) => return Err(rejection),
            next => next,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn codec() -> TokenCodec {
        TokenCodec::new(b"gate-secret-0123456789-abcdefghijklmnop", Duration::hours(24))
    }

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn test_missing_header() {
        let res = authenticate(&HeaderMap::new(), &codec());
        assert!(matches!(res, Err(GateRejection::MissingCredential)));
    }

    #[test]
    fn test_malformed_headers() {
        let codec = codec();
        let token = codec.issue(Uuid::new_v4(), "a@x.com").unwrap();
        let cases = [
            token.clone(),                  // no scheme
            format!("bearer {}", token),    // scheme is case-sensitive
            format!("Token {}", token),     // wrong scheme
            format!("Bearer  {}", token),   // double space yields three parts
            format!("Bearer {} extra", token),
            "Bearer".to_string(),
            String::new(),
        ];
        for value in cases {
            let res = authenticate(&headers(&value), &codec);
            assert!(
                matches!(res, Err(GateRejection::MalformedCredential)),
                "expected malformed for {:?}",
                value
            );
        }
    }

    #[test]
    fn test_invalid_token() {
        let res = authenticate(&headers("Bearer not-a-token"), &codec());
        assert!(matches!(
            res,
            Err(GateRejection::Unauthorized(TokenError::Invalid))
        ));
    }

    #[test]
    fn test_empty_token_is_invalid() {
        let res = authenticate(&headers("Bearer "), &codec());
        assert!(matches!(
            res,
            Err(GateRejection::Unauthorized(TokenError::Invalid))
        ));
    }

    #[test]
    fn test_expired_token() {
        let codec = codec();
        let token = codec
            .issue_at(Uuid::new_v4(), "a@x.com", Utc::now() - Duration::hours(48))
            .unwrap();
        let res = authenticate(&headers(&format!("Bearer {}", token)), &codec);
        assert!(matches!(
            res,
            Err(GateRejection::Unauthorized(TokenError::Expired))
        ));
    }

    #[test]
    fn test_valid_token_yields_identity() {
        let codec = codec();
        let id = Uuid::new_v4();
        let token = codec.issue(id, "a@x.com").unwrap();
        let user = authenticate(&headers(&format!("Bearer {}", token)), &codec).unwrap();
        assert_eq!(
            user,
            AuthenticatedUser {
                subject_id: id,
                email: "a@x.com".to_string(),
            }
        );
    }

    #[test]
    fn test_state_transitions() {
        let codec = codec();
        let token = codec.issue(Uuid::new_v4(), "a@x.com").unwrap();
        let h = headers(&format!("Bearer {}", token));

        let state = GateState::start(&h);
        assert!(matches!(state, GateState::Unauthenticated(Some(_))));
        let state = state.step(&codec);
        assert!(matches!(state, GateState::Extracted(t) if t == token));
        let state = state.step(&codec);
        assert!(matches!(state, GateState::Validated(_)));
        // Terminal states do not move
        let state = state.step(&codec);
        assert!(matches!(state, GateState::Validated(_)));
    }
}
