//! Postgres-backed store.
//!
//! Reads select `row_to_json` so rows deserialize straight into the model
//! types; writes bind the model fields explicitly. Uniqueness (user email,
//! organization name) is enforced by database constraints and surfaced as
//! [`StoreError::Conflict`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::config;
use crate::models::{Invitation, Organization, Product, User};

// Postgres unique_violation
const UNIQUE_VIOLATION: &str = "23505";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let cfg = &config::config().database;
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_secs(cfg.connection_timeout))
            .connect(database_url)
            .await?;

        info!("connected to database");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn decode_row<T: DeserializeOwned>(row: PgRow) -> Result<T, StoreError> {
        let value: Value = row
            .try_get("row")
            .map_err(|e| StoreError::Query(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn map_unique(err: sqlx::Error, message: &str) -> StoreError {
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::Conflict(message.to_string());
            }
        }
        StoreError::Sqlx(err)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        sqlx::query(
            "INSERT INTO users (user_id, name, email, password_hash, phone, role, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(user.user_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(&user.role)
        .bind(&user.status)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_unique(e, "Email already taken"))?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row =
            sqlx::query("SELECT row_to_json(t) AS row FROM (SELECT * FROM users WHERE email = $1) t")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        row.map(Self::decode_row).transpose()
    }

    async fn create_organization(&self, org: Organization) -> Result<Organization, StoreError> {
        sqlx::query(
            "INSERT INTO organizations (org_id, name, description, email, industry, org_type, country, state, address, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(org.org_id)
        .bind(&org.name)
        .bind(&org.description)
        .bind(&org.email)
        .bind(&org.industry)
        .bind(&org.org_type)
        .bind(&org.country)
        .bind(&org.state)
        .bind(&org.address)
        .bind(org.created_at)
        .bind(org.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_unique(e, "Organization name already taken"))?;

        Ok(org)
    }

    async fn find_organization(&self, org_id: Uuid) -> Result<Option<Organization>, StoreError> {
        let row = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM organizations WHERE org_id = $1) t",
        )
        .bind(org_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::decode_row).transpose()
    }

    async fn add_member(&self, org_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO organization_user (org_id, user_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(org_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn organization_members(&self, org_id: Uuid) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query(
            "SELECT row_to_json(t) AS row FROM ( \
                SELECT u.* FROM users u \
                JOIN organization_user ou ON ou.user_id = u.user_id \
                WHERE ou.org_id = $1 \
                ORDER BY u.created_at, u.user_id \
             ) t",
        )
        .bind(org_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::decode_row).collect()
    }

    async fn create_product(&self, product: Product) -> Result<Product, StoreError> {
        sqlx::query(
            "INSERT INTO products (product_id, name, description, price, tags, slug, image_url, status, quantity, org_id, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(product.product_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.tags)
        .bind(&product.slug)
        .bind(&product.image_url)
        .bind(product.status.as_str())
        .bind(product.quantity)
        .bind(product.org_id)
        .bind(product.user_id)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM products WHERE product_id = $1) t",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::decode_row).transpose()
    }

    async fn save_product(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE products SET name = $2, description = $3, price = $4, tags = $5, slug = $6, \
             image_url = $7, status = $8, quantity = $9, updated_at = $10 \
             WHERE product_id = $1",
        )
        .bind(product.product_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.tags)
        .bind(&product.slug)
        .bind(&product.image_url)
        .bind(product.status.as_str())
        .bind(product.quantity)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn create_invitation(&self, invitation: Invitation) -> Result<Invitation, StoreError> {
        sqlx::query(
            "INSERT INTO invitations (invite_id, token, link, email, org_id, expires_at, used, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(invitation.invite_id)
        .bind(invitation.token)
        .bind(&invitation.link)
        .bind(&invitation.email)
        .bind(invitation.org_id)
        .bind(invitation.expires_at)
        .bind(invitation.used)
        .bind(invitation.created_at)
        .execute(&self.pool)
        .await?;

        Ok(invitation)
    }

    async fn find_invitation(&self, token: Uuid) -> Result<Option<Invitation>, StoreError> {
        let row = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM invitations WHERE token = $1) t",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::decode_row).transpose()
    }

    async fn save_invitation(&self, invitation: &Invitation) -> Result<(), StoreError> {
        sqlx::query("UPDATE invitations SET used = $2, expires_at = $3 WHERE token = $1")
            .bind(invitation.token)
            .bind(invitation.used)
            .bind(invitation.expires_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
