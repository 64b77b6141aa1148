//! HTTP error mapping
//!
//! Every failure leaving a handler or the auth gate becomes an [`ApiError`].
//! Outcomes that could leak information are collapsed here: all credential
//! failures are one 401, "not yours" and "does not exist" are one 404, and
//! storage failures are a bare 500.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::{ApiResponse, error_codes};
use crate::catalog::CatalogError;
use crate::user_auth::GateRejection;
use crate::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("missing credentials")]
    MissingCredential,

    #[error("invalid or expired credentials")]
    Unauthorized,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("resource not found")]
    NotFound,

    #[error("email already registered")]
    Conflict,

    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::MissingCredential | Self::Unauthorized | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Validation(_) => error_codes::INVALID_PARAMETER,
            Self::MissingCredential => error_codes::MISSING_AUTH,
            Self::Unauthorized => error_codes::AUTH_FAILED,
            Self::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            Self::NotFound => error_codes::NOT_FOUND,
            Self::Conflict => error_codes::ALREADY_EXISTS,
            Self::Internal => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<GateRejection> for ApiError {
    fn from(rejection: GateRejection) -> Self {
        match rejection {
            GateRejection::MissingCredential => ApiError::MissingCredential,
            GateRejection::MalformedCredential | GateRejection::Unauthorized(_) => {
                ApiError::Unauthorized
            }
        }
    }
}

// Serde detail can echo submitted values (passwords included), so the
// reason is fixed per rejection kind.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let reason = match &rejection {
            JsonRejection::MissingJsonContentType(_) => "expected Content-Type: application/json",
            JsonRejection::JsonSyntaxError(_) => "is not valid JSON",
            JsonRejection::JsonDataError(_) => "is missing a required field or has a wrong type",
            _ => "could not be read",
        };
        tracing::debug!(status = %rejection.status(), "Rejected request body");
        ApiError::Validation(ValidationError::field("body", reason))
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound => ApiError::NotFound,
            CatalogError::Storage(e) => {
                tracing::error!(error = %e, "Product store failure");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        match self {
            ApiError::Validation(err) => {
                let body = ApiResponse {
                    code,
                    msg: "invalid input".to_string(),
                    data: Some(err.0),
                };
                (status, Json(body)).into_response()
            }
            other => (status, Json(ApiResponse::<()>::error(code, other.to_string()))).into_response(),
        }
    }
}
