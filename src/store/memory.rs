//! In-memory store backing development mode and the test suite.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::{Invitation, Organization, Product, User};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    organizations: RwLock<HashMap<Uuid, Organization>>,
    products: RwLock<HashMap<Uuid, Product>>,
    // token -> invitation
    invitations: RwLock<HashMap<Uuid, Invitation>>,
    // org_id -> member user ids, in join order
    memberships: RwLock<HashMap<Uuid, Vec<Uuid>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("Email already taken".to_string()));
        }
        users.insert(user.user_id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create_organization(&self, org: Organization) -> Result<Organization, StoreError> {
        let mut organizations = self.organizations.write().await;
        if organizations.values().any(|o| o.name == org.name) {
            return Err(StoreError::Conflict(
                "Organization name already taken".to_string(),
            ));
        }
        organizations.insert(org.org_id, org.clone());
        Ok(org)
    }

    async fn find_organization(&self, org_id: Uuid) -> Result<Option<Organization>, StoreError> {
        let organizations = self.organizations.read().await;
        Ok(organizations.get(&org_id).cloned())
    }

    async fn add_member(&self, org_id: Uuid, user_id: Uuid) -> Result<(), StoreError> {
        let mut memberships = self.memberships.write().await;
        let members = memberships.entry(org_id).or_default();
        if !members.contains(&user_id) {
            members.push(user_id);
        }
        Ok(())
    }

    async fn organization_members(&self, org_id: Uuid) -> Result<Vec<User>, StoreError> {
        let memberships = self.memberships.read().await;
        let users = self.users.read().await;

        let members = memberships
            .get(&org_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| users.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(members)
    }

    async fn create_product(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = self.products.write().await;
        products.insert(product.product_id, product.clone());
        Ok(product)
    }

    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products.get(&product_id).cloned())
    }

    async fn save_product(&self, product: &Product) -> Result<(), StoreError> {
        let mut products = self.products.write().await;
        products.insert(product.product_id, product.clone());
        Ok(())
    }

    async fn create_invitation(&self, invitation: Invitation) -> Result<Invitation, StoreError> {
        let mut invitations = self.invitations.write().await;
        invitations.insert(invitation.token, invitation.clone());
        Ok(invitation)
    }

    async fn find_invitation(&self, token: Uuid) -> Result<Option<Invitation>, StoreError> {
        let invitations = self.invitations.read().await;
        Ok(invitations.get(&token).cloned())
    }

    async fn save_invitation(&self, invitation: &Invitation) -> Result<(), StoreError> {
        let mut invitations = self.invitations.write().await;
        invitations.insert(invitation.token, invitation.clone());
        Ok(())
    }
}
