//! Narrow storage contract consumed by the handlers.
//!
//! Entities are addressed by their business identifiers; whatever primary
//! keys the backend uses stay behind this trait. Two implementations exist:
//! a Postgres backend for deployments and an in-memory backend for
//! development and the test suite.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Invitation, Organization, Product, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("query error: {0}")]
    Query(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn health(&self) -> Result<(), StoreError>;

    // Users
    async fn create_user(&self, user: User) -> Result<User, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    // Organizations and membership
    async fn create_organization(&self, org: Organization) -> Result<Organization, StoreError>;
    async fn find_organization(&self, org_id: Uuid) -> Result<Option<Organization>, StoreError>;
    async fn add_member(&self, org_id: Uuid, user_id: Uuid) -> Result<(), StoreError>;
    /// Members of the organization, ordered by join/creation time.
    async fn organization_members(&self, org_id: Uuid) -> Result<Vec<User>, StoreError>;

    // Products
    async fn create_product(&self, product: Product) -> Result<Product, StoreError>;
    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, StoreError>;
    /// Persist the current state of an already-created product. Each call
    /// issues a write; callers must treat it as non-idempotent at this layer.
    async fn save_product(&self, product: &Product) -> Result<(), StoreError>;

    // Invitations
    async fn create_invitation(&self, invitation: Invitation) -> Result<Invitation, StoreError>;
    async fn find_invitation(&self, token: Uuid) -> Result<Option<Invitation>, StoreError>;
    async fn save_invitation(&self, invitation: &Invitation) -> Result<(), StoreError>;
}
