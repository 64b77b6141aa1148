//! In-process stores backed by `DashMap`
//!
//! Same contract as the PostgreSQL stores: unique emails, and product
//! update/delete that check ownership under the same shard lock as the write.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use super::StoreError;
use crate::account::{Identity, IdentityStore, NewIdentity};
use crate::catalog::{NewProduct, Product, ProductPatch, ProductStore};

/// Identities keyed by email
#[derive(Default)]
pub struct MemoryIdentityStore {
    by_email: DashMap<String, Identity>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn insert(&self, new: NewIdentity) -> Result<Identity, StoreError> {
        match self.by_email.entry(new.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate("email")),
            Entry::Vacant(slot) => {
                let identity = new.into_identity(Utc::now());
                slot.insert(identity.clone());
                Ok(identity)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self.by_email.get(email).map(|r| r.value().clone()))
    }
}

/// Products keyed by id
#[derive(Default)]
pub struct MemoryProductStore {
    products: DashMap<Uuid, Product>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total products across all owners
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, owner_id: Uuid, new: NewProduct) -> Result<Product, StoreError> {
        let product = new.into_product(owner_id, Utc::now());
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn list(&self, owner_id: Uuid) -> Result<Vec<Product>, StoreError> {
        let mut owned: Vec<Product> = self
            .products
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .map(|r| r.value().clone())
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let Some(mut product) = self.products.get_mut(&id) else {
            return Ok(None);
        };
        if product.owner_id != owner_id {
            return Ok(None);
        }
        patch.apply(&mut *product, Utc::now());
        Ok(Some(product.value().clone()))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        Ok(self
            .products
            .remove_if(&id, |_, p| p.owner_id == owner_id)
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_identity(email: &str) -> NewIdentity {
        NewIdentity {
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            kind: "misc".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryIdentityStore::new();
        store.insert(new_identity("a@x.com")).await.unwrap();
        let second = store.insert(new_identity("a@x.com")).await;
        assert!(matches!(second, Err(StoreError::Duplicate("email"))));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let store = MemoryIdentityStore::new();
        store.insert(new_identity("A@x.com")).await.unwrap();
        assert!(store.find_by_email("a@x.com").await.unwrap().is_none());
        assert!(store.find_by_email("A@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_filters_by_owner_in_creation_order() {
        let store = MemoryProductStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let first = store.create(alice, product("one")).await.unwrap();
        store.create(bob, product("theirs")).await.unwrap();
        let second = store.create(alice, product("two")).await.unwrap();

        let listed = store.list(alice).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|p| p.owner_id == alice));
        assert!(listed.contains(&first) && listed.contains(&second));
        assert!(listed[0].created_at <= listed[1].created_at);
    }

    #[tokio::test]
    async fn test_update_wrong_owner_leaves_product_untouched() {
        let store = MemoryProductStore::new();
        let alice = Uuid::new_v4();
        let created = store.create(alice, product("one")).await.unwrap();

        let patch = ProductPatch {
            name: Some("hijacked".to_string()),
            kind: None,
        };
        let res = store.update(Uuid::new_v4(), created.id, patch).await.unwrap();
        assert!(res.is_none());
        assert_eq!(store.list(alice).await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_delete_wrong_owner_keeps_product() {
        let store = MemoryProductStore::new();
        let alice = Uuid::new_v4();
        let created = store.create(alice, product("one")).await.unwrap();

        assert!(!store.delete(Uuid::new_v4(), created.id).await.unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.delete(alice, created.id).await.unwrap());
        assert!(store.is_empty());
    }
}
