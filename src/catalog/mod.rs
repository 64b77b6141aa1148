//! Ownership-scoped product catalog
//!
//! Every read and write is filtered by the caller's identity. A product id on
//! its own never authorizes anything: stores take `owner_id` as a mandatory
//! parameter and fold it into the same statement that reads or mutates.

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use models::{
    CreateProductRequest, NewProduct, Product, ProductPatch, UpdateProductRequest,
};
pub use repository::{PgProductStore, ProductStore};
pub use service::{CatalogError, CatalogService};
