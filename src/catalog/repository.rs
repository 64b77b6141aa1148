//! Product persistence

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{NewProduct, Product, ProductPatch};
use crate::db::StoreError;

/// Ownership-scoped query interface over the product collection.
///
/// Every method except `create` filters on `owner_id`, and the filter is part
/// of the same statement as the read or write, so there is no window between
/// the ownership check and the mutation.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn create(&self, owner_id: Uuid, new: NewProduct) -> Result<Product, StoreError>;

    async fn list(&self, owner_id: Uuid) -> Result<Vec<Product>, StoreError>;

    /// Returns `None` when no product matches both `id` and `owner_id`.
    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError>;

    /// Returns `false` when no product matches both `id` and `owner_id`.
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, StoreError>;
}

/// PostgreSQL-backed product store
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create(&self, owner_id: Uuid, new: NewProduct) -> Result<Product, StoreError> {
        let product = new.into_product(owner_id, Utc::now().trunc_subsecs(6));

        sqlx::query(
            r#"INSERT INTO products (id, owner_id, name, kind, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(product.id)
        .bind(product.owner_id)
        .bind(&product.name)
        .bind(&product.kind)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    async fn list(&self, owner_id: Uuid) -> Result<Vec<Product>, StoreError> {
        let rows: Vec<Product> = sqlx::query_as(
            r#"SELECT id, owner_id, name, kind, created_at, updated_at
               FROM products WHERE owner_id = $1
               ORDER BY created_at, id"#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let row: Option<Product> = sqlx::query_as(
            r#"UPDATE products
               SET name = COALESCE($3, name),
                   kind = COALESCE($4, kind),
                   updated_at = $5
               WHERE id = $1 AND owner_id = $2
               RETURNING id, owner_id, name, kind, created_at, updated_at"#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(patch.name)
        .bind(patch.kind)
        .bind(Utc::now().trunc_subsecs(6))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let res = sqlx::query(r#"DELETE FROM products WHERE id = $1 AND owner_id = $2"#)
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}
