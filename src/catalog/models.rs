use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A catalog item owned by exactly one identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[schema(example = "Espresso machine")]
    pub name: String,
    #[schema(example = "appliance")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated create payload; the store assigns id, owner and timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub kind: String,
}

impl NewProduct {
    pub(crate) fn into_product(self, owner_id: Uuid, now: DateTime<Utc>) -> Product {
        Product {
            id: Uuid::new_v4(),
            owner_id,
            name: self.name,
            kind: self.kind,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields to overwrite; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub kind: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.kind.is_none()
    }

    /// Apply to an in-memory product, refreshing `updated_at`
    pub(crate) fn apply(self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(kind) = self.kind {
            product.kind = kind;
        }
        product.updated_at = now;
    }
}

/// Create product request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Espresso machine")]
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    #[schema(example = "appliance")]
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub kind: String,
}

impl CreateProductRequest {
    /// Trim surrounding whitespace so blank values fail the length rules
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            kind: self.kind.trim().to_string(),
        }
    }

    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            kind: self.kind,
        }
    }
}

/// Partial update request: absent or blank fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(default)]
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub kind: Option<String>,
}

impl UpdateProductRequest {
    /// Trim fields and drop the blank ones, so length rules see what would be stored
    pub fn normalized(self) -> Self {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            name: non_blank(self.name),
            kind: non_blank(self.kind),
        }
    }

    pub fn into_patch(self) -> ProductPatch {
        let Self { name, kind } = self.normalized();
        ProductPatch { name, kind }
    }
}
