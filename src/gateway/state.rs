use std::sync::Arc;

use crate::account::IdentityStore;
use crate::catalog::{CatalogService, ProductStore};
use crate::db::Database;
use crate::user_auth::{CredentialHasher, HashingError, TokenCodec, UserAuthService};

/// Gateway application state (shared across handlers)
#[derive(Clone)]
pub struct AppState {
    /// Token codec used by the auth gate
    pub tokens: Arc<TokenCodec>,
    /// Registration and login
    pub auth: Arc<UserAuthService>,
    /// Owner-scoped product operations
    pub catalog: Arc<CatalogService>,
    /// PostgreSQL handle for health checks (None with the memory backend)
    pub db: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(
        tokens: Arc<TokenCodec>,
        identities: Arc<dyn IdentityStore>,
        products: Arc<dyn ProductStore>,
        hasher: CredentialHasher,
        db: Option<Arc<Database>>,
    ) -> Result<Self, HashingError> {
        let auth = UserAuthService::new(identities, hasher, tokens.clone())?;
        Ok(Self {
            tokens,
            auth: Arc::new(auth),
            catalog: Arc::new(CatalogService::new(products)),
            db,
        })
    }
}
