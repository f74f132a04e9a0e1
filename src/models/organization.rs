use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::validation::ValidatedFields;

/// Tenant root: products and memberships are always scoped to an
/// organization. `org_id` is the business identifier; name is unique
/// system-wide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub org_id: Uuid,
    pub name: String,
    pub description: String,
    pub email: String,
    pub industry: String,
    pub org_type: String,
    pub country: String,
    pub state: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Build a new organization from validated creation fields.
    pub fn from_validated(fields: &ValidatedFields) -> Self {
        let text = |key: &str| -> String {
            fields
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let now = Utc::now();
        Self {
            org_id: Uuid::new_v4(),
            name: text("name"),
            description: text("description"),
            email: text("email"),
            industry: text("industry"),
            org_type: text("type"),
            country: text("country"),
            state: text("state"),
            address: text("address"),
            created_at: now,
            updated_at: now,
        }
    }
}
