//! Identity management
//!
//! Registered principals and the store they live in. The password hash never
//! leaves this module in serialized form: responses use [`UserView`].

pub mod models;
pub mod repository;

pub use models::{Identity, NewIdentity, UserView};
pub use repository::{IdentityStore, PgIdentityStore};
