use std::sync::Arc;
use uuid::Uuid;

use super::models::{NewProduct, Product, ProductPatch};
use super::repository::ProductStore;
use crate::db::StoreError;
use crate::user_auth::AuthenticatedUser;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No product with this id belongs to the caller. Deliberately the same
    /// outcome whether the id does not exist or is owned by someone else.
    #[error("product not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Product operations on behalf of an authenticated caller
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        new: NewProduct,
    ) -> Result<Product, CatalogError> {
        let product = self.store.create(user.subject_id, new).await?;
        tracing::info!(owner_id = %user.subject_id, product_id = %product.id, "Product created");
        Ok(product)
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<Product>, CatalogError> {
        Ok(self.store.list(user.subject_id).await?)
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Product, CatalogError> {
        let product = self
            .store
            .update(user.subject_id, id, patch)
            .await?
            .ok_or(CatalogError::NotFound)?;
        tracing::info!(owner_id = %user.subject_id, product_id = %id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, user: &AuthenticatedUser, id: Uuid) -> Result<(), CatalogError> {
        if !self.store.delete(user.subject_id, id).await? {
            return Err(CatalogError::NotFound);
        }
        tracing::info!(owner_id = %user.subject_id, product_id = %id, "Product deleted");
        Ok(())
    }
}
