//! Stockroom - per-user product catalog API
//!
//! Registered users receive a signed, time-bounded bearer token and manage
//! a private catalog of products. Every catalog read and write is scoped to
//! the identity the token proves.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing subscriber setup
//! - [`validation`] - field-level input validation errors
//! - [`db`] - PostgreSQL pool, schema bootstrap and in-memory stores
//! - [`account`] - identities and the identity store
//! - [`user_auth`] - password hashing, tokens, the auth gate, register/login
//! - [`catalog`] - owner-scoped product operations
//! - [`gateway`] - axum router, envelope and HTTP error mapping

pub mod account;
pub mod catalog;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod user_auth;
pub mod validation;

// Convenient re-exports at crate root
pub use account::{Identity, UserView};
pub use catalog::{CatalogService, Product};
pub use config::AppConfig;
pub use gateway::{build_router, state::AppState};
pub use user_auth::{AuthenticatedUser, TokenCodec, UserAuthService};
