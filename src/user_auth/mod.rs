//! User authentication
//!
//! - `password`: Argon2id credential hashing and verification
//! - `token`: HS256 signed, time-bounded identity tokens
//! - `gate`: the per-request credential check (header → verified identity)
//! - `middleware`: Axum wiring for the gate
//! - `service`: registration and login
//! - `handlers`: HTTP endpoints for registration and login

pub mod gate;
pub mod handlers;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

pub use gate::{AuthenticatedUser, BEARER_SCHEME, GateRejection, GateState, authenticate};
pub use middleware::jwt_auth_middleware;
pub use password::{CredentialHasher, HashingError};
pub use service::{AuthResponse, AuthServiceError, LoginRequest, RegisterRequest, UserAuthService};
pub use token::{Claims, TokenCodec, TokenError};
