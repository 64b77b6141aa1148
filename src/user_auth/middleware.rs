use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use std::sync::Arc;

use super::gate::authenticate;
use crate::gateway::{error::ApiError, state::AppState};

/// Axum middleware guarding protected routes.
///
/// On success the [`AuthenticatedUser`](super::AuthenticatedUser) is inserted
/// into request extensions; on any rejection the request ends here with 401
/// and the inner handler never runs.
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    match authenticate(request.headers(), &state.tokens) {
        Ok(user) => {
            tracing::debug!(user_id = %user.subject_id, "Request authenticated");
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Err(rejection) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                reason = %rejection,
                "Rejected at auth gate"
            );
            Err(rejection.into())
        }
    }
}
